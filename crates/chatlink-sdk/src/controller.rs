//! The conversation controller state machine.
//!
//! [`ConversationController`] owns the [`Conversation`] outright and is the
//! only code that mutates it. It reacts to exactly two inputs, a submission
//! from the view and the resolution of a reply cycle, and goes through two
//! states per submission:
//!
//! ```text
//! IDLE --submit()--> AWAITING --reply success--> IDLE (bot message appended)
//! IDLE --submit()--> AWAITING --reply failure--> IDLE (no message appended)
//! ```
//!
//! The reply fetch runs on a spawned task whose only link back to the
//! controller is one [`ReplyOutcome`] on an unbounded channel; the owning
//! event loop hands the outcome to [`on_reply_resolved`]. At most one cycle
//! is in flight at a time: a submission while AWAITING is ignored.
//!
//! [`on_reply_resolved`]: ConversationController::on_reply_resolved

use std::sync::Arc;
use std::time::Duration;

use chatlink_models::{AvatarRef, Conversation, Message, Participant};
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::error::SdkError;
use crate::source::ReplySource;

/// How long the typing indicator is left up after a reply resolves.
pub const DEFAULT_REPLY_DELAY: Duration = Duration::from_secs(1);

// ---------------------------------------------------------------------------
// ReplyOutcome
// ---------------------------------------------------------------------------

/// Resolution of one reply cycle, delivered on the controller's outcome
/// channel after the display delay has elapsed.
#[derive(Debug)]
pub enum ReplyOutcome {
    /// The reply source produced a reply text.
    Reply(String),
    /// The reply source failed; this turn gets no bot message.
    Unavailable(SdkError),
}

// ---------------------------------------------------------------------------
// ConversationController
// ---------------------------------------------------------------------------

/// Owns one conversation and drives its submission / reply lifecycle.
///
/// Constructed with an optional [`ReplySource`] (`None` runs the static
/// variant, where submissions append the user message and no reply cycle
/// ever starts) and the sending half of the outcome channel the owner's
/// event loop listens on.
///
/// [`submit`](Self::submit) spawns the reply fetch on the current tokio
/// runtime, so the controller must live inside one.
pub struct ConversationController {
    conversation: Conversation,
    source: Option<Arc<dyn ReplySource>>,
    outcomes: UnboundedSender<ReplyOutcome>,
    reply_delay: Duration,
    user: Participant,
    bot: Participant,
    user_avatar: Option<AvatarRef>,
    bot_avatar: Option<AvatarRef>,
    in_flight: Option<JoinHandle<()>>,
}

impl ConversationController {
    /// Create a controller over an empty conversation.
    pub fn new(
        source: Option<Arc<dyn ReplySource>>,
        outcomes: UnboundedSender<ReplyOutcome>,
    ) -> Self {
        Self {
            conversation: Conversation::new(),
            source,
            outcomes,
            reply_delay: DEFAULT_REPLY_DELAY,
            user: Participant::user(),
            bot: Participant::bot(),
            user_avatar: None,
            bot_avatar: None,
            in_flight: None,
        }
    }

    /// Override the display delay applied after each reply resolution.
    #[must_use]
    pub fn with_reply_delay(mut self, delay: Duration) -> Self {
        self.reply_delay = delay;
        self
    }

    /// Use a non-default bot participant (e.g. a named greeter).
    #[must_use]
    pub fn with_bot(mut self, bot: Participant) -> Self {
        self.bot = bot;
        self
    }

    /// Attach avatar references to newly created messages.
    #[must_use]
    pub fn with_avatars(mut self, user: AvatarRef, bot: AvatarRef) -> Self {
        self.user_avatar = Some(user);
        self.bot_avatar = Some(bot);
        self
    }

    /// Seed the conversation with a greeting from the bot participant.
    #[must_use]
    pub fn with_greeting(mut self, greeting: Message) -> Self {
        self.conversation = Conversation::with_greeting(greeting);
        self
    }

    /// Read-only view of the owned conversation state.
    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    /// The bot participant replies are attributed to.
    pub fn bot(&self) -> &Participant {
        &self.bot
    }

    /// Replace the draft verbatim with the input surface's current text.
    pub fn update_draft(&mut self, text: impl Into<String>) {
        self.conversation.set_draft(text);
    }

    /// Submit the current draft.
    ///
    /// A whitespace-only draft, or a submission while a reply is already
    /// awaited, is silently ignored. Otherwise the user message is appended
    /// and the draft cleared before the reply fetch starts, so the view sees
    /// the message immediately.
    pub fn submit(&mut self) {
        if self.conversation.awaiting_reply() {
            debug!("submission ignored: a reply is already awaited");
            return;
        }

        // Message construction doubles as the emptiness check: it trims the
        // draft and refuses a blank result.
        let Ok(message) = Message::new(self.conversation.draft(), self.user.clone()) else {
            return;
        };
        let text = message.text().to_string();

        self.conversation
            .append(attach_avatar(message, self.user_avatar.as_ref()));
        self.conversation.clear_draft();

        let Some(source) = &self.source else {
            // Static variant: the user message stands alone.
            return;
        };
        self.conversation.set_awaiting_reply(true);

        let source = Arc::clone(source);
        let outcomes = self.outcomes.clone();
        let delay = self.reply_delay;
        self.in_flight = Some(tokio::spawn(async move {
            let outcome = match source.fetch_reply(&text).await {
                Ok(reply) => ReplyOutcome::Reply(reply),
                Err(err) => ReplyOutcome::Unavailable(err),
            };
            // Let the typing indicator render for a beat before resolving.
            tokio::time::sleep(delay).await;
            let _ = outcomes.send(outcome);
        }));
    }

    /// Integrate the resolution of the in-flight reply cycle.
    ///
    /// On success the bot message is appended; on failure nothing is
    /// appended and the error is logged. Either way the cycle ends and the
    /// typing indicator clears.
    pub fn on_reply_resolved(&mut self, outcome: ReplyOutcome) {
        match outcome {
            ReplyOutcome::Reply(text) => {
                match Message::new(&text, self.bot.clone()) {
                    Ok(message) => self
                        .conversation
                        .append(attach_avatar(message, self.bot_avatar.as_ref())),
                    // A blank reply body is as unusable as no reply.
                    Err(err) => warn!(error = %err, "discarding blank bot reply"),
                }
            }
            ReplyOutcome::Unavailable(err) => {
                warn!(error = %err, "reply unavailable; continuing without a bot message");
            }
        }
        self.conversation.set_awaiting_reply(false);
        self.in_flight = None;
    }
}

impl Drop for ConversationController {
    fn drop(&mut self) {
        // A late resolution must never act on a disposed controller.
        if let Some(task) = self.in_flight.take() {
            task.abort();
        }
    }
}

fn attach_avatar(message: Message, avatar: Option<&AvatarRef>) -> Message {
    match avatar {
        Some(avatar) => message.with_avatar(avatar.clone()),
        None => message,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chatlink_models::Role;
    use tokio::sync::mpsc::{self, error::TryRecvError, UnboundedReceiver};

    struct FixedReply(&'static str);

    #[async_trait]
    impl ReplySource for FixedReply {
        async fn fetch_reply(&self, _text: &str) -> Result<String, SdkError> {
            Ok(self.0.to_string())
        }
    }

    struct FailingReply;

    #[async_trait]
    impl ReplySource for FailingReply {
        async fn fetch_reply(&self, _text: &str) -> Result<String, SdkError> {
            Err(SdkError::Backend("503: unavailable".to_string()))
        }
    }

    struct NeverReply;

    #[async_trait]
    impl ReplySource for NeverReply {
        async fn fetch_reply(&self, _text: &str) -> Result<String, SdkError> {
            tokio::time::sleep(Duration::from_secs(3600)).await;
            Ok(String::new())
        }
    }

    fn controller(
        source: Option<Arc<dyn ReplySource>>,
    ) -> (ConversationController, UnboundedReceiver<ReplyOutcome>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let controller =
            ConversationController::new(source, tx).with_reply_delay(Duration::ZERO);
        (controller, rx)
    }

    fn texts(controller: &ConversationController) -> Vec<&str> {
        controller
            .conversation()
            .history()
            .iter()
            .map(Message::text)
            .collect()
    }

    #[tokio::test]
    async fn empty_draft_never_submits() {
        let (mut c, _rx) = controller(Some(Arc::new(FixedReply("Hello!"))));
        c.submit();
        c.update_draft("   ");
        c.submit();
        assert!(c.conversation().is_empty());
        assert!(!c.conversation().awaiting_reply());
        // The rejected whitespace draft stays in place.
        assert_eq!(c.conversation().draft(), "   ");
    }

    #[tokio::test]
    async fn submit_appends_user_message_optimistically() {
        let (mut c, _rx) = controller(Some(Arc::new(FixedReply("Hello!"))));
        c.update_draft("hello");
        c.submit();

        // Before any reply arrives: message visible, draft cleared, awaiting.
        assert_eq!(texts(&c), vec!["hello"]);
        assert_eq!(c.conversation().history()[0].sender().role, Role::User);
        assert_eq!(c.conversation().draft(), "");
        assert!(c.conversation().awaiting_reply());
    }

    #[tokio::test]
    async fn submit_trims_the_draft() {
        let (mut c, _rx) = controller(None);
        c.update_draft("  Hi  ");
        c.submit();
        assert_eq!(texts(&c), vec!["Hi"]);
    }

    #[tokio::test]
    async fn successful_cycle_appends_bot_reply() {
        // Scenario A: user turn, then exactly one bot reply, then idle.
        let (mut c, mut rx) = controller(Some(Arc::new(FixedReply("Hello!"))));
        c.update_draft("Hi");
        c.submit();

        let outcome = rx.recv().await.expect("reply cycle should resolve");
        c.on_reply_resolved(outcome);

        assert_eq!(texts(&c), vec!["Hi", "Hello!"]);
        assert_eq!(c.conversation().history()[1].sender().role, Role::Bot);
        assert!(!c.conversation().awaiting_reply());
        assert_eq!(rx.try_recv().unwrap_err(), TryRecvError::Empty);
    }

    #[tokio::test]
    async fn failed_cycle_appends_nothing_but_clears_awaiting() {
        // Scenario B: transport error, no bot message, indicator clears.
        let (mut c, mut rx) = controller(Some(Arc::new(FailingReply)));
        c.update_draft("Hi");
        c.submit();

        let outcome = rx.recv().await.expect("failure should still resolve");
        assert!(matches!(outcome, ReplyOutcome::Unavailable(_)));
        c.on_reply_resolved(outcome);

        assert_eq!(texts(&c), vec!["Hi"]);
        assert!(!c.conversation().awaiting_reply());
    }

    #[tokio::test]
    async fn static_variant_never_starts_a_cycle() {
        // Scenario C: seeded greeting, no reply source.
        let greeting =
            Message::new("Hello my friend", Participant::named(Role::Bot, "Joe")).unwrap();
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut c = ConversationController::new(None, tx)
            .with_bot(Participant::named(Role::Bot, "Joe"))
            .with_greeting(greeting);

        c.update_draft("Hey Joe");
        c.submit();

        assert_eq!(texts(&c), vec!["Hello my friend", "Hey Joe"]);
        assert_eq!(c.conversation().history()[1].sender().role, Role::User);
        assert!(!c.conversation().awaiting_reply());
        assert_eq!(rx.try_recv().unwrap_err(), TryRecvError::Empty);
    }

    #[tokio::test]
    async fn overlapping_submission_is_rejected() {
        let (mut c, mut rx) = controller(Some(Arc::new(FixedReply("Hello!"))));
        c.update_draft("one");
        c.submit();
        c.update_draft("two");
        c.submit();

        // Second submission ignored: history unchanged, draft preserved.
        assert_eq!(texts(&c), vec!["one"]);
        assert_eq!(c.conversation().draft(), "two");

        c.on_reply_resolved(rx.recv().await.unwrap());
        assert_eq!(texts(&c), vec!["one", "Hello!"]);

        // Once idle again the held draft can go through.
        c.submit();
        assert_eq!(texts(&c), vec!["one", "Hello!", "two"]);
    }

    #[tokio::test]
    async fn each_cycle_resolves_exactly_once() {
        let (mut c, mut rx) = controller(Some(Arc::new(FixedReply("ack"))));
        for turn in ["first", "second"] {
            c.update_draft(turn);
            c.submit();
            c.on_reply_resolved(rx.recv().await.unwrap());
        }
        assert_eq!(texts(&c), vec!["first", "ack", "second", "ack"]);
        assert_eq!(rx.try_recv().unwrap_err(), TryRecvError::Empty);
    }

    #[tokio::test]
    async fn resolution_waits_for_the_display_delay() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut c = ConversationController::new(Some(Arc::new(FixedReply("Hello!"))), tx)
            .with_reply_delay(Duration::from_millis(20));
        c.update_draft("Hi");
        c.submit();

        // Nothing can have resolved yet: the fetch task has not even run.
        assert_eq!(rx.try_recv().unwrap_err(), TryRecvError::Empty);
        let outcome = rx.recv().await.expect("resolves after the delay");
        assert!(matches!(outcome, ReplyOutcome::Reply(ref t) if t == "Hello!"));
    }

    #[tokio::test]
    async fn blank_bot_reply_is_discarded() {
        let (mut c, mut rx) = controller(Some(Arc::new(FixedReply("   "))));
        c.update_draft("Hi");
        c.submit();
        c.on_reply_resolved(rx.recv().await.unwrap());
        assert_eq!(texts(&c), vec!["Hi"]);
        assert!(!c.conversation().awaiting_reply());
    }

    #[tokio::test]
    async fn teardown_aborts_the_in_flight_cycle() {
        let (mut c, mut rx) = controller(Some(Arc::new(NeverReply)));
        c.update_draft("Hi");
        c.submit();
        drop(c);

        // Both channel halves held by the controller and its task are gone.
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn avatars_are_attached_to_both_sides() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut c = ConversationController::new(Some(Arc::new(FixedReply("Hello!"))), tx)
            .with_reply_delay(Duration::ZERO)
            .with_avatars(AvatarRef::new("./User.png"), AvatarRef::new("/Bot.png"));
        c.update_draft("Hi");
        c.submit();
        c.on_reply_resolved(rx.recv().await.unwrap());

        let history = c.conversation().history();
        assert_eq!(history[0].avatar().unwrap().as_str(), "./User.png");
        assert_eq!(history[1].avatar().unwrap().as_str(), "/Bot.png");
    }
}
