use std::{env, time::Duration};

use log::*;
use provider_tools::{razorpay::RazorpayConfig, twilio::TwilioConfig};
use seva_common::{helpers::parse_boolean_flag, Secret, DEFAULT_CURRENCY_CODE};
use seva_engine::DEFAULT_GATEWAY_TIMEOUT;

use crate::errors::ServerError;

const DEFAULT_SEVA_HOST: &str = "127.0.0.1";
const DEFAULT_SEVA_PORT: u16 = 8360;
const DEFAULT_SMS_TIMEOUT: Duration = Duration::from_secs(10);
const DEFAULT_RECONCILE_INTERVAL: Duration = Duration::from_secs(300);

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub razorpay: RazorpayConfig,
    pub twilio: TwilioConfig,
    /// HS256 secret for the bearer tokens that authenticate campaign owners
    pub jwt_secret: Secret<String>,
    /// Upper bound on every call to the payment gateway
    pub gateway_timeout: Duration,
    /// Upper bound on sending a thank-you SMS
    pub sms_timeout: Duration,
    /// If false, donations are recorded on the client's word that the payment went through. **DANGER**
    pub verify_payments: bool,
    /// How often the raised counters are checked against the ledger. `None` disables the check.
    pub reconcile_interval: Option<Duration>,
    pub default_currency: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_SEVA_HOST.to_string(),
            port: DEFAULT_SEVA_PORT,
            database_url: String::default(),
            razorpay: RazorpayConfig::default(),
            twilio: TwilioConfig::default(),
            jwt_secret: Secret::default(),
            gateway_timeout: DEFAULT_GATEWAY_TIMEOUT,
            sms_timeout: DEFAULT_SMS_TIMEOUT,
            verify_payments: true,
            reconcile_interval: Some(DEFAULT_RECONCILE_INTERVAL),
            default_currency: DEFAULT_CURRENCY_CODE.to_string(),
        }
    }
}

impl ServerConfig {
    pub fn new(host: &str, port: u16) -> Self {
        Self { host: host.to_string(), port, ..Default::default() }
    }

    /// Loads the configuration from `SEVA_*` environment variables. Every missing required variable is reported in a
    /// single error.
    pub fn try_from_env() -> Result<Self, ServerError> {
        Self::try_from_lookup(|name| env::var(name).ok())
    }

    pub fn try_from_lookup<F>(lookup: F) -> Result<Self, ServerError>
    where F: Fn(&str) -> Option<String> {
        let mut missing = Vec::new();
        let mut required = |name: &'static str| {
            lookup(name).filter(|s| !s.trim().is_empty()).unwrap_or_else(|| {
                error!("🪛️ {name} is not set.");
                missing.push(name);
                String::default()
            })
        };
        let database_url = required("SEVA_DATABASE_URL");
        let key_id = required("SEVA_RAZORPAY_KEY_ID");
        let key_secret = required("SEVA_RAZORPAY_KEY_SECRET");
        let account_sid = required("SEVA_TWILIO_ACCOUNT_SID");
        let auth_token = required("SEVA_TWILIO_AUTH_TOKEN");
        let from_number = required("SEVA_TWILIO_FROM_NUMBER");
        let jwt_secret = required("SEVA_JWT_SECRET");
        if !missing.is_empty() {
            return Err(ServerError::ConfigurationError(format!(
                "Required environment variables are missing: {}",
                missing.join(", ")
            )));
        }

        let host = lookup("SEVA_HOST").unwrap_or_else(|| DEFAULT_SEVA_HOST.into());
        let port = lookup("SEVA_PORT")
            .map(|s| {
                s.parse::<u16>().unwrap_or_else(|e| {
                    error!(
                        "🪛️ {s} is not a valid port for SEVA_PORT. {e} Using the default, {DEFAULT_SEVA_PORT}, \
                         instead."
                    );
                    DEFAULT_SEVA_PORT
                })
            })
            .unwrap_or(DEFAULT_SEVA_PORT);
        let gateway_timeout = seconds_or_default(&lookup, "SEVA_GATEWAY_TIMEOUT", DEFAULT_GATEWAY_TIMEOUT);
        let sms_timeout = seconds_or_default(&lookup, "SEVA_SMS_TIMEOUT", DEFAULT_SMS_TIMEOUT);
        let reconcile_interval = seconds_or_default(&lookup, "SEVA_RECONCILE_INTERVAL", DEFAULT_RECONCILE_INTERVAL);
        let reconcile_interval = (!reconcile_interval.is_zero()).then_some(reconcile_interval);
        if reconcile_interval.is_none() {
            info!("🪛️ SEVA_RECONCILE_INTERVAL is 0. Raised counters will not be reconciled.");
        }
        let verify_payments = parse_boolean_flag(lookup("SEVA_VERIFY_PAYMENTS"), true);
        if !verify_payments {
            warn!(
                "🚨️🚨️🚨️ Payment verification is disabled. Donations will be recorded without checking the payment \
                 with Razorpay. DO NOT run production like this. 🚨️🚨️🚨️"
            );
        }
        let default_currency = lookup("SEVA_DEFAULT_CURRENCY")
            .map(|s| s.trim().to_ascii_uppercase())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_CURRENCY_CODE.to_string());

        let razorpay = RazorpayConfig::new(key_id, key_secret).with_timeout(gateway_timeout);
        let twilio = TwilioConfig::new(account_sid, auth_token, from_number).with_timeout(sms_timeout);
        Ok(Self {
            host,
            port,
            database_url,
            razorpay,
            twilio,
            jwt_secret: Secret::new(jwt_secret),
            gateway_timeout,
            sms_timeout,
            verify_payments,
            reconcile_interval,
            default_currency,
        })
    }
}

fn seconds_or_default<F>(lookup: &F, name: &str, default: Duration) -> Duration
where F: Fn(&str) -> Option<String> {
    lookup(name)
        .ok_or_else(|| debug!("🪛️ {name} is not set. Using the default value of {}s.", default.as_secs()))
        .and_then(|s| {
            s.trim()
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|e| warn!("🪛️ Invalid configuration value for {name}. {e}. Using {}s.", default.as_secs()))
        })
        .unwrap_or(default)
}
