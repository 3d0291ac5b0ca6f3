//! Store settings model.

use serde::{Deserialize, Serialize};
use url::Url;

use super::validation::{ValidationError, require_text};

/// Business profile used by the assistant when talking to customers.
///
/// There is exactly one per account and it is replaced wholesale on save.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreSettings {
    pub store_name: String,
    pub store_description: String,
    pub working_hours: String,
    pub delivery_info: String,
    pub payment_methods: String,
    pub catalog_summary: String,
    /// Incoming WhatsApp webhook. Empty until the integration is set up.
    #[serde(default)]
    pub whatsapp_webhook_url: String,
    /// IANA timezone name, e.g. `America/Lima`.
    pub timezone: String,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            store_name: "Mi Tienda Online".to_string(),
            store_description: "Tienda de productos variados con envíos a todo el país."
                .to_string(),
            working_hours: "Lunes a Viernes: 9:00 AM - 6:00 PM, Sábados: 9:00 AM - 1:00 PM"
                .to_string(),
            delivery_info: "Envío gratis en compras mayores a $50. Entrega en 2-3 días hábiles."
                .to_string(),
            payment_methods: "Transferencia bancaria, Yape, Plin, Pago contra entrega".to_string(),
            catalog_summary: "Vendemos ropa, calzado, accesorios y electrónica.".to_string(),
            whatsapp_webhook_url: String::new(),
            timezone: "America/Lima".to_string(),
        }
    }
}

impl StoreSettings {
    /// Check the record before it replaces the stored one.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if the store name or timezone is blank,
    /// or if a non-empty webhook URL is not an absolute `http(s)` URL.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("storeName", &self.store_name)?;
        require_text("timezone", &self.timezone)?;

        let webhook = self.whatsapp_webhook_url.trim();
        if !webhook.is_empty() {
            let url = Url::parse(webhook).map_err(|e| ValidationError::Invalid {
                field: "whatsappWebhookUrl",
                reason: e.to_string(),
            })?;
            if !matches!(url.scheme(), "http" | "https") {
                return Err(ValidationError::Invalid {
                    field: "whatsappWebhookUrl",
                    reason: format!("unsupported scheme '{}'", url.scheme()),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(StoreSettings::default().validate().is_ok());
    }

    #[test]
    fn test_blank_store_name_rejected() {
        let settings = StoreSettings {
            store_name: "  ".to_string(),
            ..StoreSettings::default()
        };
        assert_eq!(
            settings.validate(),
            Err(ValidationError::Required("storeName"))
        );
    }

    #[test]
    fn test_webhook_must_be_http_url() {
        let mut settings = StoreSettings {
            whatsapp_webhook_url: "https://hooks.example.com/wa".to_string(),
            ..StoreSettings::default()
        };
        assert!(settings.validate().is_ok());

        settings.whatsapp_webhook_url = "not a url".to_string();
        assert!(matches!(
            settings.validate(),
            Err(ValidationError::Invalid { field: "whatsappWebhookUrl", .. })
        ));

        settings.whatsapp_webhook_url = "ftp://hooks.example.com".to_string();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_missing_webhook_deserializes_empty() {
        let mut json = serde_json::to_value(StoreSettings::default()).expect("serialize");
        json.as_object_mut()
            .expect("object")
            .remove("whatsappWebhookUrl");
        let settings: StoreSettings = serde_json::from_value(json).expect("deserialize");
        assert!(settings.whatsapp_webhook_url.is_empty());
    }
}
