//! Telegram MTProto client implementation
//!
//! Thin wrapper over `grammers` that signs in with the configured phone
//! number (login code read from stdin on first run, session cached on disk)
//! and adapts the library's types to [`MessagingClient`].

use std::io::{stdin, stdout, Write};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use grammers_client::types::{Chat, Downloadable, Media};
use grammers_client::{Client, Config, InitParams, InvocationError};
use grammers_session::Session;
use log::info;

use crate::client::{MessagingClient, RawMessage, ResolvedChannel};
use crate::models::error::ClientError;
use crate::models::settings::Credentials;

pub struct TgClient {
    inner: Client,
    session_path: PathBuf,
}

impl TgClient {
    /// Connect and authorize, prompting for the login code when the session
    /// file does not hold a valid authorization yet.
    pub async fn connect(creds: &Credentials, session_path: &Path) -> Result<Self, ClientError> {
        let session = Session::load_file_or_create(session_path)
            .map_err(|e| ClientError::Transport(format!("session file: {}", e)))?;
        let client = Client::connect(Config {
            session,
            api_id: creds.api_id,
            api_hash: creds.api_hash.clone(),
            params: InitParams::default(),
        })
        .await
        .map_err(|e| ClientError::Transport(e.to_string()))?;

        if !client
            .is_authorized()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?
        {
            let token = client
                .request_login_code(&creds.phone)
                .await
                .map_err(|e| ClientError::Transport(e.to_string()))?;
            let code = prompt("Enter the login code: ")?;
            client
                .sign_in(&token, code.trim())
                .await
                .map_err(|e| ClientError::Transport(format!("sign in failed: {}", e)))?;
            client
                .session()
                .save_to_file(session_path)
                .map_err(|e| ClientError::Transport(format!("session save: {}", e)))?;
        }
        info!("Telegram client started successfully.");

        Ok(TgClient {
            inner: client,
            session_path: session_path.to_path_buf(),
        })
    }
}

#[async_trait]
impl MessagingClient for TgClient {
    type Channel = Chat;
    type Media = Media;

    async fn resolve(&self, identifier: &str) -> Result<ResolvedChannel<Chat>, ClientError> {
        let name = identifier.trim_start_matches('@');
        match self.inner.resolve_username(name).await {
            Ok(Some(chat)) => Ok(ResolvedChannel {
                title: chat.name().to_string(),
                inner: chat,
            }),
            Ok(None) => Err(ClientError::NotFound(identifier.to_string())),
            Err(e) => Err(classify_rpc(identifier, e)),
        }
    }

    async fn history(
        &self,
        channel: &Chat,
        offset_id: Option<i32>,
        page_size: usize,
    ) -> Result<Vec<RawMessage<Media>>, ClientError> {
        let mut iter = self.inner.iter_messages(channel).limit(page_size);
        if let Some(id) = offset_id {
            iter = iter.offset_id(id);
        }
        let mut page = Vec::with_capacity(page_size);
        while let Some(message) = iter
            .next()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?
        {
            page.push(RawMessage {
                id: message.id(),
                date: message.date(),
                text: message.text().to_string(),
                views: message.view_count().map(i64::from),
                media: message.media(),
            });
        }
        Ok(page)
    }

    async fn download_media(
        &self,
        media: &Media,
        dest_stem: &Path,
    ) -> Result<PathBuf, ClientError> {
        let path = dest_stem.with_extension(extension_for(media));
        self.inner
            .download_media(&Downloadable::Media(media.clone()), &path)
            .await
            .map_err(|e| ClientError::Download(e.to_string()))?;
        Ok(path)
    }

    async fn close(&self) -> Result<(), ClientError> {
        self.inner
            .session()
            .save_to_file(&self.session_path)
            .map_err(|e| ClientError::Transport(format!("session save: {}", e)))?;
        info!("Client disconnected.");
        Ok(())
    }
}

/// Map the RPC errors Telegram raises for bad channels onto the recoverable
/// kinds; everything else is transport.
fn classify_rpc(identifier: &str, e: InvocationError) -> ClientError {
    if let InvocationError::Rpc(rpc) = &e {
        match rpc.name.as_str() {
            "CHANNEL_PRIVATE" => return ClientError::Private(identifier.to_string()),
            "USERNAME_NOT_OCCUPIED" => return ClientError::NotFound(identifier.to_string()),
            "USERNAME_INVALID" | "CHANNEL_INVALID" => {
                return ClientError::Invalid(identifier.to_string())
            }
            _ => {}
        }
    }
    ClientError::Transport(e.to_string())
}

fn extension_for(media: &Media) -> String {
    match media {
        Media::Photo(_) => String::from("jpg"),
        Media::Sticker(_) => String::from("webp"),
        Media::Document(doc) => Path::new(doc.name())
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("bin")
            .to_string(),
        _ => String::from("bin"),
    }
}

fn prompt(text: &str) -> Result<String, ClientError> {
    print!("{}", text);
    stdout()
        .flush()
        .map_err(|e| ClientError::Transport(e.to_string()))?;
    let mut line = String::new();
    stdin()
        .read_line(&mut line)
        .map_err(|e| ClientError::Transport(e.to_string()))?;
    Ok(line)
}
