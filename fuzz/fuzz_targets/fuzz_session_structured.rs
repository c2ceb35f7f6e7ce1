#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use mudlink_core::{ClientCore, FormField, InboundMessage, PromptId, UiCommand};

#[derive(Debug, Arbitrary)]
enum Op {
    Open,
    Close,
    Notice(String),
    Prompt { content: String, can_go_back: bool },
    Submit { id: u8, fields: Vec<(String, bool, String)> },
    Back { id: u8 },
    Resize,
}

fuzz_target!(|ops: Vec<Op>| {
    let mut core = ClientCore::default();
    let mut live: Option<PromptId> = None;

    for op in ops.into_iter().take(256) {
        let commands = match op {
            Op::Open => core.handle_open(),
            Op::Close => core.handle_close(),
            Op::Notice(content) => core.handle_message(InboundMessage::Notice { content }),
            Op::Prompt {
                content,
                can_go_back,
            } => core.handle_message(InboundMessage::InputPrompt {
                content,
                can_go_back,
            }),
            Op::Submit { id, fields } => {
                let fields: Vec<FormField> = fields
                    .into_iter()
                    .map(|(name, checkbox, value)| {
                        if checkbox {
                            FormField::checkbox(name, !value.is_empty())
                        } else {
                            FormField::text(name, value)
                        }
                    })
                    .collect();
                core.submit(PromptId::new(u64::from(id)), &fields)
                    .unwrap_or_default()
            }
            Op::Back { id } => core
                .go_back(PromptId::new(u64::from(id)))
                .unwrap_or_default(),
            Op::Resize => core.handle_resize(),
        };

        for command in &commands {
            match command {
                UiCommand::AppendPrompt(view) => live = Some(view.id),
                UiCommand::DisablePrompt(id) => {
                    if live == Some(*id) {
                        live = None;
                    }
                }
                UiCommand::Send(frame) => {
                    let value: serde_json::Value =
                        serde_json::from_str(frame).expect("sent frame is JSON");
                    assert!(value.get("action").is_some());
                }
                _ => {}
            }
        }
        assert_eq!(live, core.active_prompt());
    }
});
