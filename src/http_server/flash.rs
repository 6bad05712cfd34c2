use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde::{Deserialize, Serialize};

pub const FLASH_COOKIE: &str = "flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Info,
    Error,
}

/// A one-shot message shown on the next rendered page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub level: Level,
    pub message: String,
}

impl Flash {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: Level::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: Level::Error,
            message: message.into(),
        }
    }
}

fn pending(jar: &CookieJar) -> Vec<Flash> {
    let Some(cookie) = jar.get(FLASH_COOKIE) else {
        return Vec::new();
    };
    let decoded = match urlencoding::decode(cookie.value()) {
        Ok(decoded) => decoded,
        Err(err) => {
            tracing::debug!("Ignoring undecodable flash cookie: {err}");
            return Vec::new();
        }
    };
    serde_json::from_str(&decoded).unwrap_or_else(|err| {
        tracing::debug!("Ignoring malformed flash cookie: {err}");
        Vec::new()
    })
}

/// Queue a message for the next page, keeping any already queued.
pub fn push(jar: CookieJar, flash: Flash) -> CookieJar {
    let mut flashes = pending(&jar);
    flashes.push(flash);

    let value = match serde_json::to_string(&flashes) {
        Ok(json) => urlencoding::encode(&json).into_owned(),
        Err(err) => {
            tracing::warn!("Failed to encode flash messages: {err}");
            return jar;
        }
    };

    jar.add(Cookie::build((FLASH_COOKIE, value)).path("/").http_only(true))
}

/// Take the queued messages and clear the cookie.
pub fn take(jar: CookieJar) -> (CookieJar, Vec<Flash>) {
    let flashes = pending(&jar);
    if jar.get(FLASH_COOKIE).is_none() {
        return (jar, flashes);
    }
    (jar.remove(Cookie::build((FLASH_COOKIE, "")).path("/")), flashes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_then_take() {
        let jar = push(
            CookieJar::new(),
            Flash::info("Venue The Musical Hop was successfully listed!"),
        );
        let jar = push(jar, Flash::error("An error occurred."));

        let raw = jar.get(FLASH_COOKIE).unwrap().value().to_string();
        assert!(!raw.contains('"'));

        let (jar, flashes) = take(jar);
        assert_eq!(
            flashes,
            vec![
                Flash::info("Venue The Musical Hop was successfully listed!"),
                Flash::error("An error occurred.")
            ]
        );
        assert!(jar.get(FLASH_COOKIE).is_none());
    }

    #[test]
    fn test_take_ignores_garbage() {
        let jar = CookieJar::new().add(Cookie::new(FLASH_COOKIE, "not-json"));
        let (_, flashes) = take(jar);
        assert!(flashes.is_empty());

        let (_, flashes) = take(CookieJar::new());
        assert!(flashes.is_empty());
    }
}
