use std::{fmt::Display, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use seva_common::Paise;
use sqlx::{FromRow, Type};

//--------------------------------------      CampaignId       ---------------------------------------------------------
/// The public, opaque identifier of a campaign. New campaigns are assigned a random UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Type, Serialize, Deserialize)]
#[sqlx(transparent)]
pub struct CampaignId(pub String);

impl CampaignId {
    pub fn random() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for CampaignId {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}

impl From<String> for CampaignId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for CampaignId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl Display for CampaignId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

//--------------------------------------       Campaign        ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Campaign {
    /// Internal row id. Reflects insertion order.
    #[serde(skip)]
    pub id: i64,
    #[serde(rename = "id")]
    pub campaign_id: CampaignId,
    pub title: String,
    pub description: String,
    pub goal: Paise,
    pub organizer: String,
    pub beneficiary_name: String,
    pub medical_condition: String,
    pub email: String,
    pub phone: String,
    pub story: String,
    pub image_url: Option<String>,
    pub created_by: String,
    /// Running total maintained by the donation flow. It can lag behind the ledger, so read paths recompute totals
    /// rather than trusting it.
    pub raised: Paise,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

//--------------------------------------      NewCampaign      ---------------------------------------------------------
#[derive(Debug, Clone)]
pub struct NewCampaign {
    pub campaign_id: CampaignId,
    pub title: String,
    pub description: String,
    pub goal: Paise,
    pub organizer: String,
    pub beneficiary_name: String,
    pub medical_condition: String,
    pub email: String,
    pub phone: String,
    pub story: String,
    pub image_url: Option<String>,
    /// The user id of the campaign owner
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

impl NewCampaign {
    /// Creates a campaign skeleton with a fresh id. The descriptive fields are filled in with the `with_*` methods.
    pub fn new<S: Into<String>>(title: S, goal: Paise, created_by: S) -> Self {
        Self {
            campaign_id: CampaignId::random(),
            title: title.into(),
            description: String::default(),
            goal,
            organizer: String::default(),
            beneficiary_name: String::default(),
            medical_condition: String::default(),
            email: String::default(),
            phone: String::default(),
            story: String::default(),
            image_url: None,
            created_by: created_by.into(),
            created_at: Utc::now(),
        }
    }

    pub fn with_description<S: Into<String>>(mut self, description: S) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_beneficiary<S: Into<String>>(mut self, beneficiary_name: S, medical_condition: S) -> Self {
        self.beneficiary_name = beneficiary_name.into();
        self.medical_condition = medical_condition.into();
        self
    }

    pub fn with_organizer<S: Into<String>>(mut self, organizer: S, email: S, phone: S) -> Self {
        self.organizer = organizer.into();
        self.email = email.into();
        self.phone = phone.into();
        self
    }

    pub fn with_story<S: Into<String>>(mut self, story: S) -> Self {
        self.story = story.into();
        self
    }

    pub fn with_image_url<S: Into<String>>(mut self, image_url: S) -> Self {
        self.image_url = Some(image_url.into());
        self
    }
}

//--------------------------------------    CampaignUpdate     ---------------------------------------------------------
/// A partial edit of a campaign's descriptive fields. The owner and the raised counter cannot be changed this way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CampaignUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub goal: Option<Paise>,
    pub organizer: Option<String>,
    pub beneficiary_name: Option<String>,
    pub medical_condition: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub story: Option<String>,
    pub image_url: Option<String>,
}

impl CampaignUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() &&
            self.description.is_none() &&
            self.goal.is_none() &&
            self.organizer.is_none() &&
            self.beneficiary_name.is_none() &&
            self.medical_condition.is_none() &&
            self.email.is_none() &&
            self.phone.is_none() &&
            self.story.is_none() &&
            self.image_url.is_none()
    }
}

//--------------------------------------       Donation        ---------------------------------------------------------
/// A ledger entry. Donations are never updated or deleted once written.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Donation {
    pub id: i64,
    pub campaign_id: CampaignId,
    pub name: String,
    pub amount: Paise,
    pub email: Option<String>,
    pub phone: String,
    pub payment_reference: Option<String>,
    pub created_at: DateTime<Utc>,
}

//--------------------------------------      NewDonation      ---------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDonation {
    pub campaign_id: CampaignId,
    /// The donor's name, as it should appear in the thank-you message
    pub name: String,
    pub amount: Paise,
    pub email: Option<String>,
    /// The donor's phone number in E.164 form
    pub phone: String,
    /// The payment provider's reference for the payment backing this donation
    pub payment_reference: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl NewDonation {
    pub fn new<S: Into<String>>(campaign_id: CampaignId, name: S, amount: Paise, phone: S) -> Self {
        Self {
            campaign_id,
            name: name.into(),
            amount,
            email: None,
            phone: phone.into(),
            payment_reference: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_email<S: Into<String>>(mut self, email: S) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_payment_reference<S: Into<String>>(mut self, reference: S) -> Self {
        self.payment_reference = Some(reference.into());
        self
    }
}

//--------------------------------------   CounterCorrection   ---------------------------------------------------------
/// A campaign whose `raised` counter disagreed with the ledger and was rewritten.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CounterCorrection {
    pub campaign_id: CampaignId,
    pub previous: Paise,
    pub corrected: Paise,
}
