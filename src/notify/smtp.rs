//! SMTP delivery of booking notifications.

use std::time::Duration;

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::booking::Booking;
use crate::config::MailerConfig;
use crate::notify::{render_booking_email, BookingNotifier, NotifyError};

pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    to: Mailbox,
    subject: String,
}

impl SmtpNotifier {
    /// Build the transport and parse both mailboxes up front so a bad address fails startup.
    pub fn new(config: &MailerConfig) -> Result<Self, NotifyError> {
        let sender: Address = config.username.parse()?;
        let from = Mailbox::new(Some(config.sender_name.clone()), sender);
        let to = Mailbox::new(None, config.recipient().parse()?);

        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)?
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .timeout(Some(Duration::from_secs(config.timeout_secs)))
            .build();

        Ok(Self {
            transport,
            from,
            to,
            subject: config.subject.clone(),
        })
    }
}

#[async_trait]
impl BookingNotifier for SmtpNotifier {
    async fn notify(&self, booking: &Booking) -> Result<(), NotifyError> {
        let message = Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(self.subject.clone())
            .header(ContentType::TEXT_HTML)
            .body(render_booking_email(booking))?;

        self.transport.send(message).await?;
        Ok(())
    }
}
