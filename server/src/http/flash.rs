//! One-shot notifications carried across a redirect in an encrypted cookie.

use axum_extra::extract::cookie::{Cookie, PrivateCookieJar, SameSite};
use serde::{Deserialize, Serialize};

pub const FLASH_COOKIE: &str = "ems_flash";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashMessage {
    pub level: FlashLevel,
    pub text: String,
}

pub trait FlashExt: Sized {
    fn push_flash(self, level: FlashLevel, text: &str) -> Self;

    /// Read every queued message and clear the queue.
    fn take_flashes(self) -> (Self, Vec<FlashMessage>);

    fn flash_success(self, text: &str) -> Self {
        self.push_flash(FlashLevel::Success, text)
    }

    fn flash_error(self, text: &str) -> Self {
        self.push_flash(FlashLevel::Error, text)
    }
}

impl FlashExt for PrivateCookieJar {
    fn push_flash(self, level: FlashLevel, text: &str) -> Self {
        let mut queue = pending(&self);
        queue.push(FlashMessage {
            level,
            text: text.to_owned(),
        });
        let Ok(value) = serde_json::to_string(&queue) else {
            return self;
        };
        let cookie = Cookie::build((FLASH_COOKIE, value))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .build();
        self.add(cookie)
    }

    fn take_flashes(self) -> (Self, Vec<FlashMessage>) {
        if self.get(FLASH_COOKIE).is_none() {
            return (self, Vec::new());
        }
        let queue = pending(&self);
        let jar = self.remove(Cookie::build((FLASH_COOKIE, "")).path("/").build());
        (jar, queue)
    }
}

fn pending(jar: &PrivateCookieJar) -> Vec<FlashMessage> {
    jar.get(FLASH_COOKIE)
        .and_then(|cookie| serde_json::from_str(cookie.value()).ok())
        .unwrap_or_default()
}
