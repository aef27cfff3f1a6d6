// sticky-scroll - Auto-follow scrolling for chat and log transcripts
// Copyright (C) 2025  The sticky-scroll contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as
// published by the Free Software Foundation, either version 3 of the
// License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AppError {
    #[error("Replay script not found")]
    ScriptNotFound,
    #[error("Replay script is invalid")]
    InvalidScript,
    #[error("Terminal setup failed")]
    TerminalFailed,
}

impl AppError {
    pub const SCRIPT_NOT_FOUND_EXIT_CODE: i32 = 20;
    pub const INVALID_SCRIPT_EXIT_CODE: i32 = 21;
    pub const TERMINAL_FAILED_EXIT_CODE: i32 = 22;

    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ScriptNotFound => Self::SCRIPT_NOT_FOUND_EXIT_CODE,
            Self::InvalidScript => Self::INVALID_SCRIPT_EXIT_CODE,
            Self::TerminalFailed => Self::TERMINAL_FAILED_EXIT_CODE,
        }
    }

    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::ScriptNotFound => "Replay script not found. Check the path passed to --script.",
            Self::InvalidScript => {
                "Replay script is invalid. Each line must be a JSON message object or {\"log\": \"...\"}."
            }
            Self::TerminalFailed => {
                "Could not draw to the terminal. Run sticky-demo in an interactive terminal."
            }
        }
    }
}
