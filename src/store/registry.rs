// evedit: Environment Variable Editor
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Windows registry backend.
//!
//! ```text
//! RootKey::CurrentUser  --> HKEY_CURRENT_USER
//! RootKey::LocalMachine --> HKEY_LOCAL_MACHINE
//! AccessRights::READ    --> KEY_READ
//! AccessRights::FULL    --> KEY_ALL_ACCESS
//!
//! query          RegQueryValueExW   REG_SZ | REG_EXPAND_SZ
//! set_expandable RegSetValueExW     REG_EXPAND_SZ (never expanded)
//! flush          RegFlushKey
//! drop           RegCloseKey
//! ```

use windows::Win32::Foundation::{
    ERROR_ACCESS_DENIED, ERROR_FILE_NOT_FOUND, ERROR_MORE_DATA, ERROR_NO_MORE_ITEMS,
    ERROR_SUCCESS, WIN32_ERROR,
};
use windows::Win32::System::Registry::{
    HKEY, HKEY_CURRENT_USER, HKEY_LOCAL_MACHINE, KEY_ALL_ACCESS, KEY_READ, REG_EXPAND_SZ,
    REG_SZ, REG_VALUE_TYPE, RegCloseKey, RegEnumValueW, RegFlushKey, RegOpenKeyExW,
    RegQueryValueExW, RegSetValueExW,
};
use windows::core::{HSTRING, PCWSTR, PWSTR};

use super::{Backend, KeyHandle};
use crate::error::StoreError;
use crate::scope::{AccessRights, Location, RootKey};

/// Longest registry value name, in UTF-16 units, plus the terminator.
const MAX_VALUE_NAME: usize = 16_384;

/// Backend over the live Windows registry.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegistryBackend;

impl RegistryBackend {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

fn status_error(location: &Location, status: WIN32_ERROR) -> StoreError {
    if status == ERROR_ACCESS_DENIED {
        return StoreError::AccessDenied {
            scope: location.scope(),
            location: location.to_string(),
        };
    }
    #[allow(clippy::cast_possible_wrap)]
    let message = std::io::Error::from_raw_os_error(status.0 as i32).to_string();
    StoreError::Unavailable {
        scope: location.scope(),
        location: location.to_string(),
        message,
    }
}

impl Backend for RegistryBackend {
    fn name(&self) -> &'static str {
        "registry"
    }

    fn open<'a>(
        &'a self,
        location: &Location,
        access: AccessRights,
    ) -> Result<Box<dyn KeyHandle + 'a>, StoreError> {
        let root = match location.root() {
            RootKey::CurrentUser => HKEY_CURRENT_USER,
            RootKey::LocalMachine => HKEY_LOCAL_MACHINE,
        };
        let sam = if access.allows_write() {
            KEY_ALL_ACCESS
        } else {
            KEY_READ
        };
        let path = HSTRING::from(location.path());
        let mut hkey = HKEY::default();

        // SAFETY: `path` is a NUL-terminated wide string that outlives the call
        // and `hkey` is a valid out pointer.
        let status =
            unsafe { RegOpenKeyExW(root, PCWSTR(path.as_ptr()), Some(0), sam, &raw mut hkey) };
        if status != ERROR_SUCCESS {
            return Err(status_error(location, status));
        }

        Ok(Box::new(RegistryKey {
            hkey,
            location: *location,
        }))
    }
}

/// An open registry key, closed on drop.
struct RegistryKey {
    hkey: HKEY,
    location: Location,
}

impl Drop for RegistryKey {
    fn drop(&mut self) {
        // SAFETY: `hkey` was opened by RegOpenKeyExW and is closed exactly once.
        unsafe {
            let _ = RegCloseKey(self.hkey);
        }
    }
}

impl KeyHandle for RegistryKey {
    fn query(&self, name: &str) -> Result<Option<String>, StoreError> {
        let name_w = HSTRING::from(name);
        let mut value_type = REG_VALUE_TYPE::default();
        let mut size: u32 = 0;

        // SAFETY: size query with no data buffer; all out pointers are valid.
        let mut status = unsafe {
            RegQueryValueExW(
                self.hkey,
                PCWSTR(name_w.as_ptr()),
                None,
                Some(&raw mut value_type),
                None,
                Some(&raw mut size),
            )
        };

        let mut buffer: Vec<u16> = Vec::new();
        loop {
            if status == ERROR_FILE_NOT_FOUND {
                return Ok(None);
            }
            if status != ERROR_SUCCESS && status != ERROR_MORE_DATA {
                return Err(status_error(&self.location, status));
            }
            if value_type != REG_SZ && value_type != REG_EXPAND_SZ {
                return Err(StoreError::Unavailable {
                    scope: self.location.scope(),
                    location: self.location.to_string(),
                    message: format!("value '{name}' is not a string (type {})", value_type.0),
                });
            }
            if status == ERROR_SUCCESS && !buffer.is_empty() {
                buffer.truncate((size as usize) / 2);
                break;
            }

            // `size` holds the byte length reported by the previous call; the
            // value may grow in between, which yields ERROR_MORE_DATA again.
            buffer.resize((size as usize).div_ceil(2).max(1), 0);
            size = u32::try_from(buffer.len() * 2).unwrap_or(u32::MAX);
            // SAFETY: `buffer` holds `size` bytes and outlives the call.
            status = unsafe {
                RegQueryValueExW(
                    self.hkey,
                    PCWSTR(name_w.as_ptr()),
                    None,
                    Some(&raw mut value_type),
                    Some(buffer.as_mut_ptr().cast::<u8>()),
                    Some(&raw mut size),
                )
            };
        }

        while buffer.last() == Some(&0) {
            buffer.pop();
        }
        Ok(Some(String::from_utf16_lossy(&buffer)))
    }

    fn set_expandable(&mut self, name: &str, value: &str) -> Result<(), StoreError> {
        let name_w = HSTRING::from(name);
        let data: Vec<u8> = value
            .encode_utf16()
            .chain(std::iter::once(0))
            .flat_map(u16::to_le_bytes)
            .collect();

        // SAFETY: `name_w` and `data` outlive the call.
        let status = unsafe {
            RegSetValueExW(
                self.hkey,
                PCWSTR(name_w.as_ptr()),
                Some(0),
                REG_EXPAND_SZ,
                Some(&data),
            )
        };
        if status != ERROR_SUCCESS {
            return Err(status_error(&self.location, status));
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), StoreError> {
        // SAFETY: `hkey` is an open key.
        let status = unsafe { RegFlushKey(self.hkey) };
        if status != ERROR_SUCCESS {
            return Err(status_error(&self.location, status));
        }
        Ok(())
    }

    fn value_names(&self) -> Result<Vec<String>, StoreError> {
        let mut names = Vec::new();
        let mut buffer = vec![0u16; MAX_VALUE_NAME];

        for index in 0u32.. {
            let mut len = u32::try_from(buffer.len()).unwrap_or(u32::MAX);
            // SAFETY: `buffer` holds `len` UTF-16 units and outlives the call.
            let status = unsafe {
                RegEnumValueW(
                    self.hkey,
                    index,
                    Some(PWSTR(buffer.as_mut_ptr())),
                    &raw mut len,
                    None,
                    None,
                    None,
                    None,
                )
            };
            if status == ERROR_NO_MORE_ITEMS {
                break;
            }
            if status != ERROR_SUCCESS {
                return Err(status_error(&self.location, status));
            }
            // The unnamed default value is not a variable.
            if len > 0 {
                names.push(String::from_utf16_lossy(&buffer[..len as usize]));
            }
        }

        Ok(names)
    }
}
