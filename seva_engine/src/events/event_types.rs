use crate::db_types::Donation;

/// Published after a donation has been durably recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DonationRecordedEvent {
    pub donation: Donation,
    pub campaign_title: String,
}

impl DonationRecordedEvent {
    pub fn new(donation: Donation, campaign_title: String) -> Self {
        Self { donation, campaign_title }
    }
}
