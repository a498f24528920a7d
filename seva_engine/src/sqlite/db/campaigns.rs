use chrono::Utc;
use log::{debug, trace};
use seva_common::Paise;
use sqlx::{QueryBuilder, SqliteConnection};

use crate::{
    db_types::{Campaign, CampaignId, CampaignUpdate, CounterCorrection, NewCampaign},
    seva_api::campaign_objects::CampaignQueryFilter,
    traits::CampaignStoreError,
};

pub async fn insert_campaign(campaign: NewCampaign, conn: &mut SqliteConnection) -> Result<Campaign, sqlx::Error> {
    let campaign = sqlx::query_as(
        r#"
            INSERT INTO campaigns (
                campaign_id,
                title,
                description,
                goal,
                organizer,
                beneficiary_name,
                medical_condition,
                email,
                phone,
                story,
                image_url,
                created_by,
                raised,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, 0, $13, $13)
            RETURNING *;
        "#,
    )
    .bind(campaign.campaign_id.as_str())
    .bind(campaign.title)
    .bind(campaign.description)
    .bind(campaign.goal)
    .bind(campaign.organizer)
    .bind(campaign.beneficiary_name)
    .bind(campaign.medical_condition)
    .bind(campaign.email)
    .bind(campaign.phone)
    .bind(campaign.story)
    .bind(campaign.image_url)
    .bind(campaign.created_by)
    .bind(campaign.created_at)
    .fetch_one(conn)
    .await?;
    Ok(campaign)
}

pub async fn fetch_campaign(
    campaign_id: &CampaignId,
    conn: &mut SqliteConnection,
) -> Result<Option<Campaign>, sqlx::Error> {
    let campaign = sqlx::query_as("SELECT * FROM campaigns WHERE campaign_id = $1")
        .bind(campaign_id.as_str())
        .fetch_optional(conn)
        .await?;
    Ok(campaign)
}

/// A `LIKE` pattern matching `search` anywhere in the text. Wildcards in `search` match literally when the pattern is
/// used with `ESCAPE '\'`.
fn like_pattern(search: &str) -> String {
    let mut pattern = String::with_capacity(search.len() + 2);
    pattern.push('%');
    for c in search.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// Fetches campaigns according to the criteria in the `CampaignQueryFilter`, newest first.
pub async fn search_campaigns(
    query: CampaignQueryFilter,
    conn: &mut SqliteConnection,
) -> Result<Vec<Campaign>, sqlx::Error> {
    let mut builder = QueryBuilder::new("SELECT * FROM campaigns ");
    if !query.is_empty() {
        builder.push("WHERE ");
    }
    let mut where_clause = builder.separated(" AND ");
    if let Some(search) = query.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        let pattern = like_pattern(search);
        where_clause.push("(title LIKE ");
        where_clause.push_bind_unseparated(pattern.clone());
        where_clause.push_unseparated(r" ESCAPE '\' OR description LIKE ");
        where_clause.push_bind_unseparated(pattern.clone());
        where_clause.push_unseparated(r" ESCAPE '\' OR beneficiary_name LIKE ");
        where_clause.push_bind_unseparated(pattern.clone());
        where_clause.push_unseparated(r" ESCAPE '\' OR medical_condition LIKE ");
        where_clause.push_bind_unseparated(pattern);
        where_clause.push_unseparated(r" ESCAPE '\'");
        where_clause.push_unseparated(")");
    }
    if let Some(owner) = query.created_by {
        where_clause.push("created_by = ");
        where_clause.push_bind_unseparated(owner);
    }
    if let Some(since) = query.since {
        where_clause.push("created_at >= ");
        where_clause.push_bind_unseparated(since);
    }
    if let Some(until) = query.until {
        where_clause.push("created_at <= ");
        where_clause.push_bind_unseparated(until);
    }
    // Row ids grow with every insert, so this is newest first even for campaigns created in the same instant
    builder.push(" ORDER BY id DESC");
    trace!("🗃️ Executing query: {}", builder.sql());
    let campaigns = builder.build_query_as::<Campaign>().fetch_all(conn).await?;
    trace!("🗃️ {} campaigns matched", campaigns.len());
    Ok(campaigns)
}

pub async fn update_campaign(
    campaign_id: &CampaignId,
    update: CampaignUpdate,
    conn: &mut SqliteConnection,
) -> Result<Option<Campaign>, CampaignStoreError> {
    if update.is_empty() {
        debug!("🗃️ No fields to update for campaign {campaign_id}. Update request skipped.");
        return Err(CampaignStoreError::EmptyUpdate);
    }
    let mut builder = QueryBuilder::new("UPDATE campaigns SET updated_at = ");
    builder.push_bind(Utc::now());
    builder.push(", ");
    let mut set_clause = builder.separated(", ");
    let text_fields = [
        ("title", update.title),
        ("description", update.description),
        ("organizer", update.organizer),
        ("beneficiary_name", update.beneficiary_name),
        ("medical_condition", update.medical_condition),
        ("email", update.email),
        ("phone", update.phone),
        ("story", update.story),
        ("image_url", update.image_url),
    ];
    for (column, value) in text_fields {
        if let Some(value) = value {
            set_clause.push(format!("{column} = "));
            set_clause.push_bind_unseparated(value);
        }
    }
    if let Some(goal) = update.goal {
        set_clause.push("goal = ");
        set_clause.push_bind_unseparated(goal);
    }
    builder.push(" WHERE campaign_id = ");
    builder.push_bind(campaign_id.as_str());
    builder.push(" RETURNING *");
    trace!("🗃️ Executing query: {}", builder.sql());
    let campaign = builder.build_query_as::<Campaign>().fetch_optional(conn).await?;
    Ok(campaign)
}

/// Adds `amount` to the campaign's running total in a single statement.
pub async fn increment_raised(
    campaign_id: &CampaignId,
    amount: Paise,
    conn: &mut SqliteConnection,
) -> Result<(), CampaignStoreError> {
    let result = sqlx::query("UPDATE campaigns SET raised = raised + $1 WHERE campaign_id = $2")
        .bind(amount)
        .bind(campaign_id.as_str())
        .execute(conn)
        .await?;
    if result.rows_affected() == 0 {
        return Err(CampaignStoreError::CampaignNotFound(campaign_id.clone()));
    }
    trace!("🗃️ Campaign {campaign_id} running total increased by {amount}");
    Ok(())
}

/// Campaigns whose running total differs from the ledger sum.
pub async fn stale_counters(conn: &mut SqliteConnection) -> Result<Vec<CounterCorrection>, sqlx::Error> {
    let stale = sqlx::query_as(
        r#"
        SELECT campaigns.campaign_id AS campaign_id,
               campaigns.raised AS previous,
               COALESCE(SUM(donations.amount), 0) AS corrected
        FROM campaigns LEFT JOIN donations ON donations.campaign_id = campaigns.campaign_id
        GROUP BY campaigns.campaign_id
        HAVING campaigns.raised != COALESCE(SUM(donations.amount), 0)
        "#,
    )
    .fetch_all(conn)
    .await?;
    Ok(stale)
}

/// Resets the running total to the ledger sum as of now.
pub async fn reset_counter_from_ledger(
    campaign_id: &CampaignId,
    conn: &mut SqliteConnection,
) -> Result<Paise, sqlx::Error> {
    let raised = sqlx::query_scalar(
        r#"
        UPDATE campaigns
        SET raised = (SELECT COALESCE(SUM(amount), 0) FROM donations WHERE donations.campaign_id = $1)
        WHERE campaign_id = $1
        RETURNING raised
        "#,
    )
    .bind(campaign_id.as_str())
    .fetch_one(conn)
    .await?;
    Ok(raised)
}
