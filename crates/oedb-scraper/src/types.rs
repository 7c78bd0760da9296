/// A fetched HTML document plus the URL that produced it.
#[derive(Debug, Clone)]
pub struct RawPage {
    pub url: String,
    pub body: String,
}
