use serde::{Deserialize, Serialize};
use seva_common::Paise;
use seva_engine::{db_types::Donation, donation_objects::DonationReceipt};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationResponse {
    pub success: bool,
    pub message: String,
    pub donation: Donation,
    /// False if the donation was recorded but the campaign's running total could not be bumped
    pub counter_updated: bool,
    /// True if this payment had already been recorded and the original donation is being returned
    pub duplicate: bool,
}

impl From<DonationReceipt> for DonationResponse {
    fn from(receipt: DonationReceipt) -> Self {
        let message = if receipt.duplicate {
            "Donation was already recorded"
        } else {
            "Donation recorded successfully"
        };
        Self {
            success: true,
            message: message.to_string(),
            donation: receipt.donation,
            counter_updated: receipt.counter_updated,
            duplicate: receipt.duplicate,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TotalResponse {
    pub total: Paise,
}
