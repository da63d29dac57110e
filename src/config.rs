//! Conversion settings shared by the transpilers and the flowchart deriver.

/// Knobs for a conversion pass.
#[derive(Debug, Clone)]
pub struct Config {
    /// Spaces per Python indent level; also the offset the else/elif
    /// look-ahead rule measures against.
    pub indent_width: usize,
    /// Character budget for flowchart node labels before truncation.
    pub label_budget: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            indent_width: 4,
            label_budget: 30,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.indent_width, 4);
        assert_eq!(config.label_budget, 30);
    }
}
