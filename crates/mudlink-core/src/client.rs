#![forbid(unsafe_code)]

//! Host-driven client state machine.
//!
//! [`ClientCore`] never touches the DOM or the socket. The frontend feeds it
//! socket events and button clicks; it answers with [`UiCommand`]s that the
//! frontend executes in order. Frames to send travel as
//! [`UiCommand::Send`].

use tracing::{debug, info};

use crate::config::ClientConfig;
use crate::connection::{ConnectionState, ConnectionStatus, ConnectionTracker, Transition};
use crate::error::{ClientError, Result};
use crate::prompt::{FormField, PromptButton, PromptId, PromptTracker, PromptView, collect_values};
use crate::protocol::{InboundMessage, OutboundAction, decode_inbound};
use crate::scroll::{FollowDecision, FollowPolicy, ScrollMetrics};
use crate::transcript::{EntryKind, Transcript};

/// A side effect the frontend must perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiCommand {
    /// Append a `stream-entry` node with this HTML, following the bottom if
    /// the user was near it.
    AppendEntry { html: String },
    /// Append a rendered prompt, following the bottom if the user was near it.
    AppendPrompt(PromptView),
    /// Disable inputs, clear buttons, drop the active marker.
    DisablePrompt(PromptId),
    SetStatus(ConnectionStatus),
    /// Disable pointer interaction on the transcript container.
    LockTranscript,
    ScrollToBottom,
    /// Send a text frame on the socket.
    Send(String),
}

#[derive(Debug, Clone)]
pub struct ClientCore {
    connection: ConnectionTracker,
    prompts: PromptTracker,
    transcript: Transcript,
    disconnect_html: String,
}

impl Default for ClientCore {
    fn default() -> Self {
        Self::new(&ClientConfig::default())
    }
}

impl ClientCore {
    #[must_use]
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            connection: ConnectionTracker::new(),
            prompts: PromptTracker::new(),
            transcript: Transcript::new(FollowPolicy::new(config.follow_threshold_px)),
            disconnect_html: v_htmlescape::escape(&config.disconnect_notice).to_string(),
        }
    }

    #[must_use]
    pub fn connection_state(&self) -> ConnectionState {
        self.connection.state()
    }

    #[must_use]
    pub fn active_prompt(&self) -> Option<PromptId> {
        self.prompts.active()
    }

    #[must_use]
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    #[must_use]
    pub fn follow_decision(&self, before_append: ScrollMetrics) -> FollowDecision {
        self.transcript.follow_decision(before_append)
    }

    // -----------------------------------------------------------------------
    // Socket events
    // -----------------------------------------------------------------------

    pub fn handle_open(&mut self) -> Vec<UiCommand> {
        match self.connection.on_open() {
            Transition::Opened => {
                info!("connected");
                vec![UiCommand::SetStatus(ConnectionStatus::Connected)]
            }
            Transition::Closed | Transition::Ignored => Vec::new(),
        }
    }

    pub fn handle_close(&mut self) -> Vec<UiCommand> {
        match self.connection.on_close() {
            Transition::Closed => {
                info!("closed websocket");
                self.transcript.push(EntryKind::Disconnected);
                vec![
                    UiCommand::SetStatus(ConnectionStatus::Disconnected),
                    UiCommand::LockTranscript,
                    UiCommand::AppendEntry {
                        html: self.disconnect_html.clone(),
                    },
                ]
            }
            Transition::Opened | Transition::Ignored => Vec::new(),
        }
    }

    /// Decode and dispatch one inbound text frame.
    ///
    /// A rejected frame leaves all state untouched.
    pub fn handle_frame(&mut self, frame: &str) -> Result<Vec<UiCommand>> {
        debug!(frame, "inbound frame");
        let message = decode_inbound(frame)?;
        Ok(self.handle_message(message))
    }

    pub fn handle_message(&mut self, message: InboundMessage) -> Vec<UiCommand> {
        match message {
            InboundMessage::Notice { content } => {
                self.transcript.push(EntryKind::Notice);
                vec![UiCommand::AppendEntry { html: content }]
            }
            InboundMessage::InputPrompt {
                content,
                can_go_back,
            } => {
                let opened = self.prompts.open(content, can_go_back);
                let mut commands = Vec::with_capacity(2);
                if let Some(old) = opened.superseded {
                    debug!(prompt = %old, "prompt superseded");
                    commands.push(UiCommand::DisablePrompt(old));
                }
                self.transcript.push(EntryKind::Prompt(opened.view.id));
                commands.push(UiCommand::AppendPrompt(opened.view));
                commands
            }
        }
    }

    /// Window resized: pin the transcript to the bottom.
    pub fn handle_resize(&mut self) -> Vec<UiCommand> {
        vec![UiCommand::ScrollToBottom]
    }

    // -----------------------------------------------------------------------
    // Prompt actions
    // -----------------------------------------------------------------------

    /// Dispatch a prompt button click. `fields` is only read for Submit.
    pub fn handle_button(
        &mut self,
        id: PromptId,
        button: PromptButton,
        fields: &[FormField],
    ) -> Result<Vec<UiCommand>> {
        match button {
            PromptButton::Submit => self.submit(id, fields),
            PromptButton::Back => self.go_back(id),
        }
    }

    /// Answer prompt `id` with the collected `fields`.
    pub fn submit(&mut self, id: PromptId, fields: &[FormField]) -> Result<Vec<UiCommand>> {
        let action = OutboundAction::SendInput {
            data: collect_values(fields),
        };
        self.finish_prompt(id, &action)
    }

    /// Ask the server to rewind to the previous prompt.
    pub fn go_back(&mut self, id: PromptId) -> Result<Vec<UiCommand>> {
        self.finish_prompt(id, &OutboundAction::Rewind)
    }

    fn finish_prompt(&mut self, id: PromptId, action: &OutboundAction) -> Result<Vec<UiCommand>> {
        if self.connection.is_closed() {
            return Err(ClientError::Disconnected);
        }
        self.prompts.check(id)?;
        let frame = action.to_frame()?;
        self.prompts.take(id)?;
        debug!(prompt = %id, frame = %frame, "prompt answered");
        Ok(vec![UiCommand::DisablePrompt(id), UiCommand::Send(frame)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PromptError;
    use pretty_assertions::assert_eq;

    fn open_core() -> ClientCore {
        let mut core = ClientCore::default();
        core.handle_open();
        core
    }

    fn prompt_id(commands: &[UiCommand]) -> PromptId {
        commands
            .iter()
            .find_map(|cmd| match cmd {
                UiCommand::AppendPrompt(view) => Some(view.id),
                _ => None,
            })
            .expect("prompt appended")
    }

    #[test]
    fn open_sets_connected_status() {
        let mut core = ClientCore::default();
        assert_eq!(
            core.handle_open(),
            vec![UiCommand::SetStatus(ConnectionStatus::Connected)]
        );
        assert_eq!(core.connection_state(), ConnectionState::Open);
    }

    #[test]
    fn notice_appends_exactly_one_entry() {
        let mut core = open_core();
        let commands = core
            .handle_frame(r#"{"type":"notice","content":"<i>Welcome</i>"}"#)
            .expect("frame");
        assert_eq!(
            commands,
            vec![UiCommand::AppendEntry {
                html: "<i>Welcome</i>".to_owned()
            }]
        );
        assert_eq!(core.transcript().entries(), &[EntryKind::Notice]);
    }

    #[test]
    fn prompt_is_rendered_with_buttons_and_becomes_active() {
        let mut core = open_core();
        let commands = core
            .handle_frame(r#"{"type":"input-prompt","content":"<input name='b'>","can-go-back":true}"#)
            .expect("frame");
        let [UiCommand::AppendPrompt(view)] = commands.as_slice() else {
            panic!("unexpected commands: {commands:?}");
        };
        assert_eq!(view.buttons, vec![PromptButton::Submit, PromptButton::Back]);
        assert_eq!(core.active_prompt(), Some(view.id));
    }

    #[test]
    fn null_back_flag_renders_submit_only() {
        let mut core = open_core();
        let commands = core
            .handle_frame(r#"{"type":"input-prompt","content":"q","can-go-back":null}"#)
            .expect("frame");
        let [UiCommand::AppendPrompt(view)] = commands.as_slice() else {
            panic!("unexpected commands: {commands:?}");
        };
        assert_eq!(view.buttons, vec![PromptButton::Submit]);
    }

    #[test]
    fn submit_sends_collected_values_and_disables() {
        let mut core = open_core();
        let id = prompt_id(
            &core
                .handle_frame(r#"{"type":"input-prompt","content":"form"}"#)
                .expect("frame"),
        );
        let fields = [FormField::checkbox("a", true), FormField::text("b", "x")];
        let commands = core.submit(id, &fields).expect("submit");
        assert_eq!(
            commands,
            vec![
                UiCommand::DisablePrompt(id),
                UiCommand::Send(r#"{"action":"send-input","data":{"a":true,"b":"x"}}"#.to_owned()),
            ]
        );
        assert_eq!(core.active_prompt(), None);
    }

    #[test]
    fn back_sends_rewind_without_collecting() {
        let mut core = open_core();
        let id = prompt_id(
            &core
                .handle_frame(r#"{"type":"input-prompt","content":"form","can-go-back":true}"#)
                .expect("frame"),
        );
        let fields = [FormField::text("ignored", "value")];
        let commands = core
            .handle_button(id, PromptButton::Back, &fields)
            .expect("back");
        assert_eq!(
            commands,
            vec![
                UiCommand::DisablePrompt(id),
                UiCommand::Send(r#"{"action":"rewind"}"#.to_owned()),
            ]
        );
    }

    #[test]
    fn second_submit_is_rejected() {
        let mut core = open_core();
        let id = prompt_id(
            &core
                .handle_frame(r#"{"type":"input-prompt","content":"form"}"#)
                .expect("frame"),
        );
        core.submit(id, &[]).expect("first submit");
        let err = core.submit(id, &[]).unwrap_err();
        assert!(matches!(
            err,
            ClientError::Prompt(PromptError::NoActivePrompt)
        ));
    }

    #[test]
    fn superseded_prompt_is_disabled_and_rejects_actions() {
        let mut core = open_core();
        let first = prompt_id(
            &core
                .handle_frame(r#"{"type":"input-prompt","content":"one"}"#)
                .expect("frame"),
        );
        let commands = core
            .handle_frame(r#"{"type":"input-prompt","content":"two"}"#)
            .expect("frame");
        assert_eq!(commands[0], UiCommand::DisablePrompt(first));
        let second = prompt_id(&commands);
        assert_eq!(core.active_prompt(), Some(second));

        let err = core.go_back(first).unwrap_err();
        assert!(matches!(
            err,
            ClientError::Prompt(PromptError::NotActive { id }) if id == first
        ));
        assert_eq!(core.active_prompt(), Some(second));
    }

    #[test]
    fn close_appends_notice_once_and_locks() {
        let mut core = open_core();
        let commands = core.handle_close();
        assert_eq!(
            commands,
            vec![
                UiCommand::SetStatus(ConnectionStatus::Disconnected),
                UiCommand::LockTranscript,
                UiCommand::AppendEntry {
                    html: "* You have been disconnected.  Refresh to (hopefully) reconnect."
                        .to_owned()
                },
            ]
        );
        assert!(core.handle_close().is_empty());
        assert_eq!(core.transcript().len(), 1);
        assert_eq!(
            core.transcript().last(),
            Some(&EntryKind::Disconnected)
        );
    }

    #[test]
    fn disconnect_notice_is_escaped() {
        let config = ClientConfig {
            disconnect_notice: "<gone> & done".to_owned(),
            ..ClientConfig::default()
        };
        let mut core = ClientCore::new(&config);
        let commands = core.handle_close();
        assert!(commands.contains(&UiCommand::AppendEntry {
            html: "&lt;gone&gt; &amp; done".to_owned()
        }));
    }

    #[test]
    fn actions_after_close_are_refused() {
        let mut core = open_core();
        let id = prompt_id(
            &core
                .handle_frame(r#"{"type":"input-prompt","content":"form"}"#)
                .expect("frame"),
        );
        core.handle_close();
        assert!(matches!(
            core.submit(id, &[]).unwrap_err(),
            ClientError::Disconnected
        ));
        assert_eq!(core.active_prompt(), Some(id));
    }

    #[test]
    fn rejected_frames_leave_state_untouched() {
        let mut core = open_core();
        assert!(matches!(
            core.handle_frame(r#"{"type":"mystery","content":"x"}"#),
            Err(ClientError::Protocol(_))
        ));
        assert!(core.handle_frame("not json").is_err());
        assert!(core.transcript().is_empty());
        assert_eq!(core.active_prompt(), None);
    }

    #[test]
    fn resize_scrolls_to_bottom() {
        let mut core = open_core();
        assert_eq!(core.handle_resize(), vec![UiCommand::ScrollToBottom]);
    }
}
