use error_stack::Report;
use serde_json::json;

use kernel::interface::notify::Notifier;
use kernel::KernelError;

use crate::env;
use crate::error::ConvertError;

static TELEGRAM_BOT_TOKEN: &str = "TELEGRAM_BOT_TOKEN";
static TELEGRAM_CHAT_ID: &str = "TELEGRAM_CHAT_ID";

#[derive(Clone)]
pub struct TelegramNotifier {
    client: reqwest::Client,
    endpoint: String,
    chat_id: String,
}

impl TelegramNotifier {
    pub fn new() -> error_stack::Result<Self, KernelError> {
        let token = env(TELEGRAM_BOT_TOKEN)?;
        let chat_id = env(TELEGRAM_CHAT_ID)?;
        Ok(Self {
            client: reqwest::Client::new(),
            endpoint: format!("https://api.telegram.org/bot{token}/sendMessage"),
            chat_id,
        })
    }
}

#[async_trait::async_trait]
impl Notifier for TelegramNotifier {
    async fn send(&self, message: &str) -> error_stack::Result<(), KernelError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&json!({
                "chat_id": self.chat_id,
                "text": message,
            }))
            .send()
            .await
            .convert_error()?;
        response.error_for_status().convert_error()?;
        Ok(())
    }
}

impl<T> ConvertError for Result<T, reqwest::Error> {
    type Ok = T;
    fn convert_error(self) -> error_stack::Result<T, KernelError> {
        self.map_err(|error| {
            if error.is_timeout() {
                Report::new(error).change_context(KernelError::Timeout)
            } else {
                Report::new(error).change_context(KernelError::Internal)
            }
        })
    }
}

#[cfg(test)]
mod test {
    use kernel::interface::notify::Notifier;
    use kernel::KernelError;

    use crate::notify::TelegramNotifier;

    #[test_with::env(TELEGRAM_TEST)]
    #[tokio::test]
    async fn send_message() -> error_stack::Result<(), KernelError> {
        let notifier = TelegramNotifier::new()?;
        notifier.send("Notifier smoke test").await?;
        Ok(())
    }
}
