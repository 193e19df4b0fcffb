use serde::{Deserialize, Serialize};

/// Context about the review that opened the conversation.
///
/// Front-ends show it next to the transcript; the engine never reads it.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CaseDetails {
    /// Name of the customer.
    pub customer: String,
    /// The product that was reviewed.
    pub product: String,
    /// A short summary of the complaint.
    pub issue: String,
}

impl Default for CaseDetails {
    fn default() -> Self {
        Self {
            customer: "Sarah M.".to_owned(),
            product: "Bluetooth Headphones".to_owned(),
            issue: "Product quality concerns".to_owned(),
        }
    }
}
