//! Texting service - outbound SMS engagement
//!
//! Forwards an engagement payload about a service to the SMS provider and,
//! only on provider success, records the recipient and a texting log row.

use crate::{
    clients::texting::{EngagementInfo, EngagementPayload, TextingProviderClient},
    db::{ResourceRepository, ServiceRepository, TextingRepository},
    Error, Result,
};

pub struct TextingService {
    textings: TextingRepository,
    services: ServiceRepository,
    resources: ResourceRepository,
    provider: TextingProviderClient,
}

impl TextingService {
    pub fn new(
        textings: TextingRepository,
        services: ServiceRepository,
        resources: ResourceRepository,
        provider: TextingProviderClient,
    ) -> Self {
        Self {
            textings,
            services,
            resources,
            provider,
        }
    }

    /// Text a recipient about a service (POST /textings).
    pub async fn send(
        &self,
        recipient_name: Option<String>,
        phone_number: String,
        service_id: i64,
    ) -> Result<()> {
        let payload = self
            .build_payload(recipient_name.as_deref(), &phone_number, service_id)
            .await?;

        self.provider.send_engagement(&payload).await?;

        let recipient = self
            .textings
            .upsert_recipient(recipient_name.as_deref(), &phone_number)
            .await?;
        self.textings.record_texting(recipient.id, service_id).await?;

        tracing::info!(service_id, recipient_id = recipient.id, "texting sent");
        Ok(())
    }

    async fn build_payload(
        &self,
        recipient_name: Option<&str>,
        phone_number: &str,
        service_id: i64,
    ) -> Result<EngagementPayload> {
        let service = self.services.find(service_id).await?.ok_or(Error::NotFound {
            entity: "service",
            id: service_id,
        })?;
        let detail = self
            .services
            .load_details(vec![service])
            .await?
            .pop()
            .ok_or(Error::NotFound {
                entity: "service",
                id: service_id,
            })?;

        let addresses = self.resources.addresses(detail.service.resource_id).await?;
        let phones = self.resources.phones(detail.service.resource_id).await?;

        let org_phone = phones
            .first()
            .map(|p| p.number.clone())
            .unwrap_or_default();
        let address = addresses.first();

        Ok(EngagementPayload {
            first_name: recipient_name.unwrap_or_default().to_string(),
            last_name: String::new(),
            mobile_phone: phone_number.to_string(),
            tags: detail.categories.iter().map(|c| c.name.clone()).collect(),
            engagement_type: "Resource Info".to_string(),
            engagement_info: EngagementInfo {
                org_name: detail.service.name.clone(),
                org_address_1: address.map(|a| a.address_1.clone()).unwrap_or_default(),
                org_address_2: address
                    .and_then(|a| a.address_2.clone())
                    .unwrap_or_default(),
                city: address.map(|a| a.city.clone()).unwrap_or_default(),
                state: address
                    .map(|a| a.state_province.clone())
                    .unwrap_or_default(),
                zip: address.map(|a| a.postal_code.clone()).unwrap_or_default(),
                org_phone,
            },
        })
    }
}
