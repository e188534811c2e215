//! # Contact Form
//!
//! Stores messages sent from the contact page.

use chrono::Utc;
use tracing::info;

use suuq_core::validation::validate_contact;
use suuq_core::ContactMessage;

use crate::error::StorefrontResult;
use crate::ports::Ports;

pub struct ContactForm {
    ports: Ports,
}

impl ContactForm {
    pub fn new(ports: &Ports) -> Self {
        ContactForm {
            ports: ports.clone(),
        }
    }

    /// Validates and stores one message. No session is needed.
    pub async fn submit(
        &self,
        name: &str,
        email: &str,
        subject: &str,
        message: &str,
    ) -> StorefrontResult<ContactMessage> {
        let (name, email, subject, message) = validate_contact(name, email, subject, message)?;

        let contact = ContactMessage {
            name,
            email,
            subject,
            message,
            created_at: Utc::now(),
        };
        self.ports.contacts.store(&contact).await?;

        info!(email = %contact.email, subject = %contact.subject, "Contact message stored");
        Ok(contact)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryPorts;
    use crate::error::StorefrontError;

    #[tokio::test]
    async fn test_submit_stores_trimmed_message() {
        let mem = MemoryPorts::new();
        let form = ContactForm::new(&mem.ports());

        let stored = form
            .submit(" Hodan ", "hodan@example.com", "Order", "Where is my parcel?")
            .await
            .unwrap();

        assert_eq!(stored.name, "Hodan");
        assert_eq!(mem.contacts.messages(), vec![stored]);
    }

    #[tokio::test]
    async fn test_invalid_input_is_not_stored() {
        let mem = MemoryPorts::new();
        let form = ContactForm::new(&mem.ports());

        assert!(matches!(
            form.submit("Hodan", "not-an-email", "Order", "Hi").await,
            Err(StorefrontError::Validation(_))
        ));
        assert!(matches!(
            form.submit("Hodan", "h@example.com", "", "Hi").await,
            Err(StorefrontError::Validation(_))
        ));
        assert!(mem.contacts.messages().is_empty());
    }

    #[tokio::test]
    async fn test_store_failure_is_upstream() {
        let mem = MemoryPorts::new();
        mem.contacts.fail(true);

        let err = ContactForm::new(&mem.ports())
            .submit("Hodan", "h@example.com", "Order", "Hi")
            .await
            .unwrap_err();
        assert!(matches!(err, StorefrontError::Upstream { .. }));
    }
}
