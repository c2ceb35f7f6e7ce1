#![no_main]

use libfuzzer_sys::fuzz_target;
use mudlink_core::{ClientCore, UiCommand};

fuzz_target!(|data: &[u8]| {
    let Ok(frame) = std::str::from_utf8(data) else {
        return;
    };
    let mut core = ClientCore::default();
    core.handle_open();

    let before = core.transcript().len();
    match core.handle_frame(frame) {
        Ok(commands) => {
            // Every accepted frame renders exactly one transcript entry.
            assert_eq!(core.transcript().len(), before + 1);
            let appends = commands
                .iter()
                .filter(|cmd| {
                    matches!(
                        cmd,
                        UiCommand::AppendEntry { .. } | UiCommand::AppendPrompt(_)
                    )
                })
                .count();
            assert_eq!(appends, 1);
        }
        Err(_) => {
            assert_eq!(
                core.transcript().len(),
                before,
                "rejected frame mutated transcript"
            );
            assert_eq!(core.active_prompt(), None);
        }
    }
});
