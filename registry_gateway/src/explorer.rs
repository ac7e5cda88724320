/// Block-explorer link builder for transaction hashes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExplorerLink {
    template: String,
}

impl ExplorerLink {
    /// `template` may contain `{hash}`; without it the hash is appended.
    pub fn new(template: &str) -> Self {
        Self {
            template: template.to_string(),
        }
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn for_transaction(&self, tx_hash: &str) -> String {
        if self.template.contains("{hash}") {
            self.template.replace("{hash}", tx_hash)
        } else {
            format!("{}{}", self.template, tx_hash)
        }
    }
}

impl Default for ExplorerLink {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_EXPLORER_TX_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_points_at_sepolia_etherscan() {
        assert_eq!(
            ExplorerLink::default().for_transaction("0xabc"),
            "https://sepolia.etherscan.io/tx/0xabc"
        );
    }

    #[test]
    fn test_template_without_placeholder_appends_hash() {
        let link = ExplorerLink::new("https://explorer.example/tx/");
        assert_eq!(link.for_transaction("0x01"), "https://explorer.example/tx/0x01");
    }
}
