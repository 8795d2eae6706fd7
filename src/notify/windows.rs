// evedit: Environment Variable Editor
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Windows-specific broadcast.
//!
//! ```text
//! SendMessageTimeoutW(HWND_BROADCAST, WM_SETTINGCHANGE, 0, L"Environment",
//!                     SMTO_ABORTIFHUNG, timeout_ms)
//!   0 + ERROR_TIMEOUT --> NotifyError::TimedOut
//!   0 + other         --> NotifyError::Failed
//! ```

use windows::Win32::Foundation::{ERROR_TIMEOUT, GetLastError, LPARAM, WPARAM};
use windows::Win32::UI::WindowsAndMessaging::{
    HWND_BROADCAST, SMTO_ABORTIFHUNG, SendMessageTimeoutW, WM_SETTINGCHANGE,
};
use windows::core::HSTRING;

use crate::error::NotifyError;

/// Tells every top-level window that the environment changed.
pub(super) fn broadcast_environment_change(timeout_ms: u32) -> Result<(), NotifyError> {
    let area = HSTRING::from("Environment");
    let mut result: usize = 0;

    // SAFETY: `area` is a NUL-terminated wide string that outlives the call;
    // receivers only read lParam for the duration of the message.
    let sent = unsafe {
        SendMessageTimeoutW(
            HWND_BROADCAST,
            WM_SETTINGCHANGE,
            WPARAM(0),
            LPARAM(area.as_ptr() as isize),
            SMTO_ABORTIFHUNG,
            timeout_ms,
            Some(&raw mut result),
        )
    };

    if sent.0 != 0 {
        return Ok(());
    }

    // SAFETY: reads the calling thread's last-error value.
    let error = unsafe { GetLastError() };
    if error == ERROR_TIMEOUT {
        Err(NotifyError::TimedOut { timeout_ms })
    } else {
        #[allow(clippy::cast_possible_wrap)]
        let message = std::io::Error::from_raw_os_error(error.0 as i32).to_string();
        Err(NotifyError::Failed { message })
    }
}
