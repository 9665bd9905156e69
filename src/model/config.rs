/// Configuration of the paginated fetch behavior.
///
/// These were hardcoded constants in the original screen; they are promoted
/// to injected configuration with the original values as defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagerConfig {
    /// The distance from the end of the accumulated list at which a prefetch
    /// signal triggers the next page fetch.
    pub lookahead: usize,

    /// The maximum page that `current_page` may reach. Pages are never
    /// requested beyond it.
    pub max_page: u32,

    /// The page the first fetch targets.
    pub start_page: u32,
}

impl Default for PagerConfig {
    fn default() -> Self {
        Self {
            lookahead: 5,
            max_page: 34,
            start_page: 1,
        }
    }
}
