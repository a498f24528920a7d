use std::fmt::Display;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use seva_common::Paise;

use crate::{
    db_types::{Campaign, CampaignUpdate, NewCampaign},
    helpers::is_plausible_email,
    seva_api::validation::{non_blank, AmountInput, ValidationErrors},
};

//--------------------------------------  CampaignQueryFilter  ---------------------------------------------------------
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CampaignQueryFilter {
    /// Free-text search over the title, description, beneficiary and medical condition
    pub search: Option<String>,
    pub created_by: Option<String>,
    pub since: Option<DateTime<Utc>>,
    pub until: Option<DateTime<Utc>>,
}

impl CampaignQueryFilter {
    pub fn with_search<S: Into<String>>(mut self, search: S) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_owner<S: Into<String>>(mut self, created_by: S) -> Self {
        self.created_by = Some(created_by.into());
        self
    }

    pub fn since<T>(mut self, since: T) -> Result<Self, String>
    where
        T: TryInto<DateTime<Utc>>,
        T::Error: Display,
    {
        let dt = since.try_into().map_err(|e| e.to_string())?;
        self.since = Some(dt);
        Ok(self)
    }

    pub fn until<T>(mut self, until: T) -> Result<Self, String>
    where
        T: TryInto<DateTime<Utc>>,
        T::Error: Display,
    {
        let dt = until.try_into().map_err(|e| e.to_string())?;
        self.until = Some(dt);
        Ok(self)
    }

    pub fn is_empty(&self) -> bool {
        self.search.as_deref().map(str::trim).map(str::is_empty).unwrap_or(true) &&
            self.created_by.is_none() &&
            self.since.is_none() &&
            self.until.is_none()
    }
}

//--------------------------------------   CampaignWithTotal   ---------------------------------------------------------
/// A campaign, with its total recomputed from the donation ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignWithTotal {
    #[serde(flatten)]
    pub campaign: Campaign,
    pub total_amount: Paise,
}

impl CampaignWithTotal {
    /// Pairs a campaign with its ledger total. The campaign's advisory `raised` counter is overwritten with the total,
    /// so that clients reading either field see the same number.
    pub fn new(mut campaign: Campaign, total_amount: Paise) -> Self {
        campaign.raised = total_amount;
        Self { campaign, total_amount }
    }
}

//--------------------------------------  NewCampaignRequest   ---------------------------------------------------------
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCampaignRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub goal: Option<AmountInput>,
    pub organizer: Option<String>,
    pub beneficiary_name: Option<String>,
    pub medical_condition: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub story: Option<String>,
    pub image_url: Option<String>,
}

impl NewCampaignRequest {
    pub fn validate(&self, owner: &str) -> Result<NewCampaign, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        let mut required = |field: &str, value: &Option<String>| {
            let v = non_blank(value);
            if v.is_none() {
                errors.add(field, "is required");
            }
            v.unwrap_or_default()
        };
        let title = required("title", &self.title);
        let description = required("description", &self.description);
        let organizer = required("organizer", &self.organizer);
        let beneficiary_name = required("beneficiaryName", &self.beneficiary_name);
        let medical_condition = required("medicalCondition", &self.medical_condition);
        let email = required("email", &self.email);
        let phone = required("phone", &self.phone);
        let story = required("story", &self.story);
        if !email.is_empty() && !is_plausible_email(&email) {
            errors.add("email", "is not a valid email address");
        }
        let goal = match &self.goal {
            None => {
                errors.add("goal", "is required");
                Paise::default()
            },
            Some(g) => g.to_positive_paise().unwrap_or_else(|msg| {
                errors.add("goal", msg);
                Paise::default()
            }),
        };
        let mut campaign = NewCampaign::new(title, goal, owner.to_string())
            .with_description(description)
            .with_organizer(organizer, email, phone)
            .with_beneficiary(beneficiary_name, medical_condition)
            .with_story(story);
        campaign.image_url = non_blank(&self.image_url);
        errors.or_value(campaign)
    }
}

//-------------------------------------- CampaignUpdateRequest ---------------------------------------------------------
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignUpdateRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub goal: Option<AmountInput>,
    pub organizer: Option<String>,
    pub beneficiary_name: Option<String>,
    pub medical_condition: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub story: Option<String>,
    pub image_url: Option<String>,
}

impl CampaignUpdateRequest {
    /// Absent fields are left untouched, but a field that is present may not be blanked out.
    pub fn validate(&self) -> Result<CampaignUpdate, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        let mut optional = |field: &str, value: &Option<String>| {
            let v = non_blank(value);
            if value.is_some() && v.is_none() {
                errors.add(field, "cannot be empty");
            }
            v
        };
        let mut update = CampaignUpdate {
            title: optional("title", &self.title),
            description: optional("description", &self.description),
            organizer: optional("organizer", &self.organizer),
            beneficiary_name: optional("beneficiaryName", &self.beneficiary_name),
            medical_condition: optional("medicalCondition", &self.medical_condition),
            email: optional("email", &self.email),
            phone: optional("phone", &self.phone),
            story: optional("story", &self.story),
            image_url: non_blank(&self.image_url),
            goal: None,
        };
        if update.email.as_deref().is_some_and(|e| !is_plausible_email(e)) {
            errors.add("email", "is not a valid email address");
        }
        if let Some(goal) = &self.goal {
            match goal.to_positive_paise() {
                Ok(g) => update.goal = Some(g),
                Err(msg) => errors.add("goal", msg),
            }
        }
        errors.or_value(update)
    }
}
