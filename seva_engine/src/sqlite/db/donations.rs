use std::collections::BTreeSet;

use log::trace;
use seva_common::Paise;
use sqlx::{QueryBuilder, SqliteConnection};

use crate::{
    db_types::{CampaignId, Donation, NewDonation},
    traits::LedgerError,
};

/// Appends a donation to the ledger.
///
/// Constraint violations are translated: a reused payment reference becomes
/// [`LedgerError::DuplicatePaymentReference`], and a missing campaign [`LedgerError::UnknownCampaign`].
pub async fn insert_donation(donation: NewDonation, conn: &mut SqliteConnection) -> Result<Donation, LedgerError> {
    let campaign_id = donation.campaign_id.clone();
    let reference = donation.payment_reference.clone();
    let result = sqlx::query_as(
        r#"
            INSERT INTO donations (
                campaign_id,
                name,
                amount,
                email,
                phone,
                payment_reference,
                created_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *;
        "#,
    )
    .bind(donation.campaign_id.as_str())
    .bind(donation.name)
    .bind(donation.amount)
    .bind(donation.email)
    .bind(donation.phone)
    .bind(donation.payment_reference)
    .bind(donation.created_at)
    .fetch_one(conn)
    .await;
    match result {
        Ok(donation) => Ok(donation),
        Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
            Err(LedgerError::DuplicatePaymentReference(reference.unwrap_or_default()))
        },
        Err(sqlx::Error::Database(e)) if e.is_foreign_key_violation() => Err(LedgerError::UnknownCampaign(campaign_id)),
        Err(e) => Err(e.into()),
    }
}

pub async fn fetch_donation_by_reference(
    reference: &str,
    conn: &mut SqliteConnection,
) -> Result<Option<Donation>, sqlx::Error> {
    let donation = sqlx::query_as("SELECT * FROM donations WHERE payment_reference = $1")
        .bind(reference)
        .fetch_optional(conn)
        .await?;
    Ok(donation)
}

/// All donations to the campaign, newest first.
pub async fn fetch_donations_for_campaign(
    campaign_id: &CampaignId,
    conn: &mut SqliteConnection,
) -> Result<Vec<Donation>, sqlx::Error> {
    let donations = sqlx::query_as("SELECT * FROM donations WHERE campaign_id = $1 ORDER BY id DESC")
        .bind(campaign_id.as_str())
        .fetch_all(conn)
        .await?;
    Ok(donations)
}

pub async fn sum_for_campaign(campaign_id: &CampaignId, conn: &mut SqliteConnection) -> Result<Paise, sqlx::Error> {
    let sum = sqlx::query_scalar("SELECT COALESCE(SUM(amount), 0) FROM donations WHERE campaign_id = $1")
        .bind(campaign_id.as_str())
        .fetch_one(conn)
        .await?;
    Ok(sum)
}

/// Campaign ids bound per grouped query, well below SQLite's host parameter limit.
pub const SUMS_BATCH_SIZE: usize = 500;

/// Sums donations for every campaign in `campaign_ids` with one grouped query per [`SUMS_BATCH_SIZE`] distinct ids.
/// Campaigns with no donations do not appear in the result.
pub async fn sums_for_campaigns(
    campaign_ids: &[CampaignId],
    conn: &mut SqliteConnection,
) -> Result<Vec<(CampaignId, Paise)>, sqlx::Error> {
    let distinct = campaign_ids.iter().map(CampaignId::as_str).collect::<BTreeSet<_>>().into_iter().collect::<Vec<_>>();
    let mut sums = Vec::with_capacity(distinct.len());
    for batch in distinct.chunks(SUMS_BATCH_SIZE) {
        let mut builder = QueryBuilder::new("SELECT campaign_id, SUM(amount) FROM donations WHERE campaign_id IN (");
        let mut ids = builder.separated(", ");
        for id in batch {
            ids.push_bind(*id);
        }
        builder.push(") GROUP BY campaign_id");
        trace!("🗃️ Executing query: {}", builder.sql());
        sums.extend(builder.build_query_as::<(CampaignId, Paise)>().fetch_all(&mut *conn).await?);
    }
    Ok(sums)
}
