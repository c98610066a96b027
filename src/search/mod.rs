// Match retrieval — trait-based abstraction over the web search provider.
//
// The MatchRetriever trait defines the interface. GoogleSearchRetriever
// implements it with the Custom Search JSON API.

pub mod google;
pub mod traits;
