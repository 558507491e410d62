use chrono::{DateTime, Utc};

use crate::{
    json::Extras,
    pagination::{AutoPager, Page},
    Client, Nullable, Result,
};

pub type EventSubscriptionsPage = Page<EventSubscription>;

/// A webhook endpoint the API delivers events to
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EventSubscription {
    #[serde(flatten)]
    pub extras: Extras,

    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub id: Nullable<String>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub created_at: Nullable<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub idempotency_key: Nullable<String>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub oauth_connection_id: Nullable<String>,
    /// `null` means every event category is delivered
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub selected_event_category: Nullable<String>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub status: Nullable<EventSubscriptionStatus>,
    #[serde(skip_serializing_if = "Nullable::is_absent")]
    pub url: Nullable<String>,
    #[serde(rename = "type", skip_serializing_if = "Nullable::is_absent")]
    pub kind: Nullable<String>,
}

api_enum! {
    pub enum EventSubscriptionStatus {
        Active => "active",
        Disabled => "disabled",
        Deleted => "deleted",
        RequiresAttention => "requires_attention",
    }
}

#[derive(Clone, PartialEq, Default, serde::Serialize)]
pub struct EventSubscriptionCreateParams {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oauth_connection_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_event_category: Option<String>,
    /// Used to sign webhook deliveries, one is generated when left out
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shared_secret: Option<String>,
}

impl std::fmt::Debug for EventSubscriptionCreateParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventSubscriptionCreateParams")
            .field("url", &self.url)
            .field("oauth_connection_id", &self.oauth_connection_id)
            .field("selected_event_category", &self.selected_event_category)
            .field(
                "shared_secret",
                &self.shared_secret.as_deref().map(crate::util::redacted),
            )
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Default, serde::Serialize)]
pub struct EventSubscriptionUpdateParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<EventSubscriptionStatus>,
}

#[derive(Debug, Clone, PartialEq, Default, serde::Serialize)]
pub struct EventSubscriptionListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cursor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub idempotency_key: Option<String>,
}

pub struct EventSubscriptions<'a> {
    client: &'a Client,
}

impl<'a> EventSubscriptions<'a> {
    const PATH: &'static str = "/event_subscriptions";

    pub(crate) const fn new(client: &'a Client) -> Self {
        Self { client }
    }

    pub fn create(&self, params: &EventSubscriptionCreateParams) -> Result<EventSubscription> {
        log::debug!("creating event subscription: {:?}", params);
        self.client.post(Self::PATH, params)
    }

    pub fn retrieve(&self, id: &str) -> Result<EventSubscription> {
        self.client.get(&super::path(Self::PATH, id))
    }

    pub fn update(
        &self,
        id: &str,
        params: &EventSubscriptionUpdateParams,
    ) -> Result<EventSubscription> {
        self.client.patch(&super::path(Self::PATH, id), params)
    }

    pub fn list(&self, params: &EventSubscriptionListParams) -> Result<EventSubscriptionsPage> {
        super::check_limit(params.limit)?;
        self.client.get_page(Self::PATH, params)
    }

    pub fn list_auto_paging(
        &self,
        params: &EventSubscriptionListParams,
    ) -> Result<AutoPager<EventSubscription>> {
        self.list(params).map(Page::auto_paging)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{http::Method, testing::MockTransport};
    use pretty_assertions::assert_eq;

    const SUBSCRIPTION: &str = r#"{
        "created_at": "2020-01-31T23:59:59Z",
        "id": "event_subscription_001dzz0r20rcdxgb013zqb8m04g",
        "idempotency_key": null,
        "oauth_connection_id": null,
        "selected_event_category": null,
        "status": "active",
        "type": "event_subscription",
        "url": "https://website.com/webhooks"
    }"#;

    #[test]
    fn create_and_disable() {
        let mock = MockTransport::new()
            .respond(200, SUBSCRIPTION)
            .respond(200, &SUBSCRIPTION.replace(r#""active""#, r#""disabled""#));
        let client = Client::with_transport(mock.clone());
        let subscriptions = client.event_subscriptions();

        let created = subscriptions
            .create(&EventSubscriptionCreateParams {
                url: "https://website.com/webhooks".into(),
                shared_secret: Some("hunter2".into()),
                ..EventSubscriptionCreateParams::default()
            })
            .unwrap();
        assert_eq!(created.status, Nullable::Value(EventSubscriptionStatus::Active));
        assert!(created.selected_event_category.is_null());

        let updated = subscriptions
            .update(
                "event_subscription_001dzz0r20rcdxgb013zqb8m04g",
                &EventSubscriptionUpdateParams {
                    status: Some(EventSubscriptionStatus::Disabled),
                },
            )
            .unwrap();
        assert_eq!(
            updated.status,
            Nullable::Value(EventSubscriptionStatus::Disabled)
        );

        let requests = mock.requests();
        let body: serde_json::Value =
            serde_json::from_str(requests[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "url": "https://website.com/webhooks",
                "shared_secret": "hunter2",
            })
        );
        assert_eq!(requests[1].method, Method::Patch);
        assert_eq!(requests[1].body.as_deref(), Some(r#"{"status":"disabled"}"#));
    }

    #[test]
    fn debug_hides_the_secret() {
        let params = EventSubscriptionCreateParams {
            url: "https://website.com/webhooks".into(),
            shared_secret: Some("hunter2".into()),
            ..EventSubscriptionCreateParams::default()
        };
        let debug = format!("{:?}", params);
        assert!(!debug.contains("hunter2"));
        assert!(debug.contains("website.com"));
    }

    #[test]
    fn subscription_round_trip_keeps_extras() {
        let subscription: EventSubscription = crate::testing::assert_round_trip(SUBSCRIPTION);
        assert!(subscription.oauth_connection_id.is_null());

        let newer = SUBSCRIPTION.replace(
            r#""status": "active","#,
            r#""status": "paused", "delivery": {"attempts": 3, "last_error": null},"#,
        );
        let subscription: EventSubscription = crate::testing::assert_round_trip(&newer);
        assert_eq!(
            subscription.status,
            Nullable::Value(EventSubscriptionStatus::Unknown("paused".into()))
        );
        assert_eq!(subscription.extras["delivery"]["attempts"], 3);
    }
}
