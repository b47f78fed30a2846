//! CLI commands for the session cache

use clap::Subcommand;

use super::output::load_object;
use crate::api::LoginResponse;
use crate::error::CarteiraResult;
use crate::storage::{SessionContext, SessionStore};

/// Session subcommands
#[derive(Subcommand, Debug)]
pub enum SessionCommands {
    /// Cache the user from a saved login response
    Login {
        /// Saved `POST /login` response (`-` for stdin)
        #[arg(short, long)]
        response: String,
    },

    /// Cache the user from a saved registration response
    Register {
        /// Saved `POST /register` response (`-` for stdin)
        #[arg(short, long)]
        response: String,
    },

    /// Change the cached display name
    Rename {
        /// New display name
        name: String,
    },

    /// Forget the cached user
    Logout,

    /// Show the cached user
    Show,

    /// Print the screen the app would open on
    Route,
}

/// Handle session commands
pub fn handle_session_command<S: SessionStore>(
    ctx: &mut SessionContext<S>,
    cmd: SessionCommands,
) -> CarteiraResult<()> {
    match cmd {
        SessionCommands::Login { response } => {
            let response: LoginResponse = load_object(&response)?;
            let session = ctx.login(response)?;
            println!("Sessão iniciada: {}", session);
        }
        SessionCommands::Register { response } => {
            let response: LoginResponse = load_object(&response)?;
            let session = ctx.register(response)?;
            println!("Conta registada: {}", session);
        }
        SessionCommands::Rename { name } => {
            let session = ctx.rename(&name)?;
            println!("Nome atualizado: {}", session.user_name);
        }
        SessionCommands::Logout => {
            ctx.logout()?;
            println!("Sessão terminada.");
        }
        SessionCommands::Show => match ctx.current() {
            Some(session) => {
                println!("Utilizador: {}", session.user_name);
                println!("ID:         {}", session.user_id.get());
            }
            None => println!("Sem sessão ativa."),
        },
        SessionCommands::Route => {
            println!("{}", ctx.initial_route());
        }
    }

    Ok(())
}
