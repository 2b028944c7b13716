mod serpapi_client;

pub use serpapi_client::SerpApiClient;
