//! Administrative front-end over the reecord store.
//!
//! # Responsibility
//! - Open the store once per invocation and close it on every exit path.
//! - Map rejected input to exit code 2 and store failures to exit code 1.

mod cli;

use clap::Parser;
use cli::{Cli, Commands, NoteCommand, NoteFields, UserCommand};
use log::error;
use reecord_core::{
    default_log_level, init_logging, parse_note_id, DbError, Note, NoteInput, NoteService,
    NoteServiceError, Store, UserService, UserServiceError,
};
use std::error::Error;
use std::fmt::{Display, Formatter};

fn main() {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => std::process::exit(0),
        Err(err) => {
            eprintln!("Error: {err}");
            std::process::exit(err.exit_code());
        }
    }
}

#[derive(Debug)]
enum CliError {
    Logging(String),
    Db(DbError),
    Note(NoteServiceError),
    User(UserServiceError),
    LoginFailed,
    NoteNotFound(u64),
}

impl CliError {
    fn exit_code(&self) -> i32 {
        match self {
            Self::Note(err) if err.is_client_error() => 2,
            Self::User(err) if err.is_client_error() => 2,
            Self::LoginFailed | Self::NoteNotFound(_) => 2,
            _ => 1,
        }
    }
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Logging(message) => write!(f, "{message}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::Note(err) => write!(f, "{err}"),
            Self::User(err) => write!(f, "{err}"),
            Self::LoginFailed => write!(f, "Invalid username or password."),
            Self::NoteNotFound(id) => write!(f, "note not found: {id}"),
        }
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Note(err) => Some(err),
            Self::User(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for CliError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<NoteServiceError> for CliError {
    fn from(value: NoteServiceError) -> Self {
        Self::Note(value)
    }
}

impl From<UserServiceError> for CliError {
    fn from(value: UserServiceError) -> Self {
        Self::User(value)
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    if let Some(log_dir) = cli.log_dir.as_ref() {
        let level = cli.log_level.as_deref().unwrap_or(default_log_level());
        init_logging(level, log_dir).map_err(CliError::Logging)?;
    }

    let store = Store::open(&cli.db)?;
    let result = match cli.command {
        Commands::User(command) => run_user(&store, command),
        Commands::Note(command) => run_note(&store, command),
    };
    if let Err(err) = &result {
        error!("event=cli_command module=cli status=error error={err}");
    }

    let closed = store.close();
    result?;
    closed.map_err(CliError::from)
}

fn run_user(store: &Store, command: UserCommand) -> Result<(), CliError> {
    let service = UserService::new(store);
    match command {
        UserCommand::Add { username, password } => {
            service.register(&username, &password)?;
            println!("User successfully added.");
        }
        UserCommand::Remove { username } => {
            service.unregister(&username)?;
            println!("User successfully removed.");
        }
        UserCommand::Passwd {
            username,
            new_password,
        } => {
            service.change_password(&username, &new_password)?;
            println!("Password changed.");
        }
        UserCommand::Login { username, password } => {
            if !service.login(&username, &password)? {
                return Err(CliError::LoginFailed);
            }
            println!("Login successful.");
        }
    }
    Ok(())
}

fn run_note(store: &Store, command: NoteCommand) -> Result<(), CliError> {
    let service = NoteService::new(store);
    match command {
        NoteCommand::Add(fields) => {
            let note = service.create_note(note_input(fields))?;
            println!("Note {} recorded.", note.id);
        }
        NoteCommand::List => {
            let notes = service.list_notes()?;
            if notes.is_empty() {
                println!("No notes.");
            }
            for note in &notes {
                print_note(note);
            }
        }
        NoteCommand::Show { id } => {
            let id = parse_note_id(&id)?;
            let note = service.get_note(id)?.ok_or(CliError::NoteNotFound(id))?;
            print_note(&note);
            if !note.details.is_empty() {
                println!("    {}", note.details);
            }
        }
        NoteCommand::Update { id, fields } => {
            let id = parse_note_id(&id)?;
            let note = service.update_note(id, note_input(fields))?;
            println!("Note {} updated.", note.id);
        }
        NoteCommand::Remove { id } => {
            let id = parse_note_id(&id)?;
            service.delete_note(id)?;
            println!("Note {id} removed.");
        }
    }
    Ok(())
}

fn note_input(fields: NoteFields) -> NoteInput {
    NoteInput {
        title: fields.title,
        link: fields.link,
        details: fields.details,
        author: fields.author,
    }
}

fn print_note(note: &Note) {
    let mut line = format!("[{}] {} ({})", note.id, note.title, note.pretty_date());
    if !note.author.is_empty() {
        line.push_str(&format!(" by {}", note.author));
    }
    if !note.link.is_empty() {
        line.push_str(&format!(" <{}>", note.render_link()));
    }
    println!("{line}");
}
