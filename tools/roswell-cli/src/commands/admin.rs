//! Admin account and session commands.

use anyhow::{Context as _, Result};
use roswell_auth::{hash_password, AdminGate, AuthError};
use serde_json::json;

use super::{read_secret, AdminArgs, AdminCommand};
use crate::context::Context;

/// Run the admin command.
pub async fn run(args: AdminArgs, ctx: &Context) -> Result<()> {
    match args.command {
        AdminCommand::HashPassword { password } => {
            let password = match password {
                Some(p) => p,
                None => read_secret("New admin password: ")?,
            };
            let hash = hash_password(&password).context("Failed to hash password")?;

            if ctx.output.is_json() {
                ctx.output.json(&json!({ "password_hash": hash }));
            } else {
                ctx.output.plain(&hash);
                ctx.output
                    .info("Put this value in admin.password_hash in roswell.toml.");
            }
            Ok(())
        }
        AdminCommand::Login { username, password } => {
            let gate = ctx.admin_gate()?;
            let username = username.unwrap_or_else(|| ctx.config.admin.username.clone());
            let password = match password {
                Some(p) => p,
                None => read_secret("Password: ")?,
            };

            let session = match gate.login(&username, &password).await {
                Ok(session) => session,
                Err(AuthError::InvalidCredentials) => {
                    anyhow::bail!("Invalid username or password")
                }
                Err(e) => return Err(e).context("Login failed"),
            };
            ctx.save_session(&session)?;

            if ctx.output.is_json() {
                ctx.output.json(&json!({
                    "username": session.username,
                    "expires_at": session.expires_at,
                }));
            } else {
                ctx.output.success(&format!(
                    "Logged in as {} until {}",
                    session.username,
                    session.expires_at.format("%Y-%m-%d %H:%M UTC")
                ));
            }
            Ok(())
        }
        AdminCommand::Logout => {
            if let (Some(session), Ok(gate)) = (ctx.saved_session()?, ctx.admin_gate()) {
                if gate.restore(session.clone()).is_ok() {
                    gate.logout(&session.token).await;
                }
            }
            ctx.clear_session()?;
            ctx.output.success("Logged out");
            Ok(())
        }
        AdminCommand::Status => {
            let session = ctx.saved_session()?;

            if ctx.output.is_json() {
                ctx.output.json(&json!({
                    "logged_in": session.as_ref().is_some_and(|s| !s.is_expired()),
                    "username": session.as_ref().map(|s| s.username.clone()),
                    "expires_at": session.as_ref().map(|s| s.expires_at),
                }));
                return Ok(());
            }

            match session {
                Some(session) if !session.is_expired() => {
                    let remaining = session.remaining();
                    ctx.output.success(&format!("Logged in as {}", session.username));
                    ctx.output.kv(
                        "expires in",
                        &format!("{}h {:02}m", remaining.num_hours(), remaining.num_minutes() % 60),
                    );
                }
                Some(session) => {
                    ctx.output
                        .warn(&format!("Session for {} has expired", session.username));
                }
                None => ctx.output.info("Not logged in."),
            }
            Ok(())
        }
    }
}
