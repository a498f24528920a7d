use cucumber::{given, then, when};
use seva_common::Paise;
use seva_engine::{
    db_types::NewCampaign,
    donation_objects::DonationRequest,
    CampaignManagement,
    DonationError,
};

use crate::cucumber::DonationWorld;

#[given(expr = "a campaign {string} with a goal of {int} rupees")]
async fn create_campaign(world: &mut DonationWorld, title: String, goal: i64) {
    let campaign = NewCampaign::new(title.as_str(), Paise::from_major(goal), "owner-1")
        .with_description("Medical treatment")
        .with_beneficiary("Arjun", "Kidney failure")
        .with_organizer("Priya", "priya@example.com", "+919876543210")
        .with_story("A story");
    let campaign = world.system().await.db.insert_campaign(campaign).await.expect("Error creating campaign");
    world.campaigns.insert(title, campaign.campaign_id);
}

#[when(expr = "{string} donates {float} rupees to {string}")]
async fn donate(world: &mut DonationWorld, name: String, amount: f64, title: String) {
    donate_with_phone(world, name, amount, title, "9876543210".into()).await;
}

#[when(expr = "{string} donates {float} rupees to {string} from phone {string}")]
async fn donate_with_phone(world: &mut DonationWorld, name: String, amount: f64, title: String, phone: String) {
    let id = world.campaign_id(&title);
    let request = DonationRequest::new(&id, &name, amount, &phone);
    let result = world.system().await.flow.record_donation(request).await;
    world.last_result = Some(result);
}

#[when(expr = "{string} donates {float} rupees to {string} with payment {word}")]
async fn donate_with_payment(world: &mut DonationWorld, name: String, amount: f64, title: String, reference: String) {
    let id = world.campaign_id(&title);
    let request = DonationRequest::new(&id, &name, amount, "9876543210").with_payment_reference(&reference);
    let result = world.system().await.flow.record_donation(request).await;
    world.last_result = Some(result);
}

#[then(expr = "the donation is recorded")]
async fn donation_recorded(world: &mut DonationWorld) {
    let receipt = match world.last_result.as_ref().expect("No donation was attempted") {
        Ok(receipt) => receipt,
        Err(e) => panic!("Donation failed: {e}"),
    };
    assert!(!receipt.duplicate, "Donation was treated as a duplicate");
}

#[then(expr = "the donation is recognised as a duplicate")]
async fn donation_duplicate(world: &mut DonationWorld) {
    let result = world.last_result.as_ref().expect("No donation was attempted");
    assert!(matches!(result, Ok(receipt) if receipt.duplicate));
}

#[then(expr = "the donation is rejected because the campaign does not exist")]
async fn rejected_unknown_campaign(world: &mut DonationWorld) {
    let result = world.last_result.as_ref().expect("No donation was attempted");
    assert!(matches!(result, Err(DonationError::CampaignNotFound(_))), "Got {result:?}");
}

#[then(expr = "the donation is rejected because {word} is invalid")]
async fn rejected_invalid_field(world: &mut DonationWorld, field: String) {
    let result = world.last_result.as_ref().expect("No donation was attempted");
    match result {
        Err(DonationError::Validation(errors)) => assert!(errors.contains(&field), "{field} was not flagged: {errors}"),
        other => panic!("Expected a validation error, got {other:?}"),
    }
}

#[then(expr = "the total for {string} is {float} rupees")]
async fn check_total(world: &mut DonationWorld, title: String, expected: f64) {
    let id = world.campaign_id(&title);
    let total = world.system().await.aggregation.total_for_campaign(&id).await.expect("Error fetching total");
    let expected = Paise::try_from_major(expected).expect("Not a valid amount");
    assert_eq!(total, expected);
}

#[then(expr = "{string} has {int} donations")]
async fn check_donation_count(world: &mut DonationWorld, title: String, count: usize) {
    let id = world.campaign_id(&title);
    let donations =
        world.system().await.aggregation.donations_for_campaign(&id).await.expect("Error fetching donations");
    assert_eq!(donations.len(), count);
}

#[then(expr = "the campaign listing shows {string} with a total of {float} rupees")]
async fn check_listing(world: &mut DonationWorld, title: String, expected: f64) {
    let listing =
        world.system().await.aggregation.campaigns_with_totals(Default::default()).await.expect("Error listing");
    let entry = listing.iter().find(|c| c.campaign.title == title).expect("Campaign is not listed");
    let expected = Paise::try_from_major(expected).expect("Not a valid amount");
    assert_eq!(entry.total_amount, expected);
}
