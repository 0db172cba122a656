use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "quilombo")]
#[command(about = "Offline-first record keeping for quilombola education programs")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Optional path to local database file
    #[arg(long, global = true, value_name = "PATH")]
    pub db_path: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Capture a record into the local store
    #[command(alias = "new")]
    Add {
        #[command(subcommand)]
        entity: AddCommands,
    },
    /// List locally-stored records in a collection
    List {
        /// Collection name (e.g. tutores, anotacoes)
        collection: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show connectivity, pending changes, and conflicts
    Status {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run one reconciliation pass against the remote store
    Sync,
    /// List unresolved sync conflicts
    Conflicts {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Resolve one conflict
    Resolve {
        /// Remote table the conflict belongs to
        table: String,
        /// Id of the local record snapshot
        local_id: i64,
        /// Which side wins
        #[arg(long, value_enum)]
        keep: KeepChoice,
    },
    /// Export local collections to a JSON backup
    Export {
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
    /// Import a JSON backup, overwriting local collections
    Import {
        /// Backup file path
        path: PathBuf,
    },
    /// Erase local entity data and the conflict set
    Clear {
        /// Skip the confirmation guard
        #[arg(long)]
        yes: bool,
    },
    /// Probe connectivity periodically, syncing on reconnect
    Watch {
        /// Probe period in seconds
        #[arg(long, default_value = "30")]
        interval: u64,
    },
    /// Generate shell completion scripts
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: CompletionShell,
        /// Optional output path (stdout when omitted)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum AddCommands {
    /// Meeting with a municipal education office
    Reuniao {
        #[arg(long)]
        titulo: String,
        /// Meeting date (e.g. 2025-03-14)
        #[arg(long)]
        data: String,
        #[arg(long)]
        municipio_id: i64,
        #[arg(long)]
        secretario: String,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        telefone: Option<String>,
        #[arg(long, default_value = "agendada")]
        status: String,
        #[arg(long)]
        descricao: Option<String>,
        #[arg(long)]
        observacoes: Option<String>,
    },
    /// Tutor
    Tutor {
        #[arg(long)]
        nome: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        municipio_id: i64,
        #[arg(long)]
        telefone: Option<String>,
        #[arg(long)]
        area_atuacao: Option<String>,
        #[arg(long)]
        formacao: Option<String>,
        #[arg(long)]
        experiencia_anos: Option<i64>,
    },
    /// Supervisor
    Supervisor {
        #[arg(long)]
        nome: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        municipio_id: i64,
        #[arg(long)]
        telefone: Option<String>,
        #[arg(long)]
        area_supervisao: Option<String>,
        #[arg(long)]
        formacao: Option<String>,
    },
    /// Course trainee
    Cursista {
        #[arg(long)]
        nome: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        municipio_id: i64,
        #[arg(long)]
        telefone: Option<String>,
        #[arg(long)]
        escola: Option<String>,
        #[arg(long)]
        cargo: Option<String>,
        #[arg(long)]
        curso_interesse: Option<String>,
    },
    /// Trainer
    Formador {
        #[arg(long)]
        nome: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        municipio_id: i64,
        #[arg(long)]
        telefone: Option<String>,
        #[arg(long)]
        especialidade: Option<String>,
        #[arg(long)]
        formacao: Option<String>,
        #[arg(long)]
        certificacoes: Option<String>,
    },
    /// Annotation attached to an existing record
    Anotacao {
        /// Parent entity kind (e.g. tutor)
        #[arg(long)]
        entity: String,
        #[arg(long)]
        entity_id: i64,
        #[arg(long)]
        titulo: String,
        #[arg(long)]
        conteudo: String,
        #[arg(long)]
        autor: String,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum KeepChoice {
    /// Overwrite the remote row with the local snapshot
    Local,
    /// Keep the remote row, discard the local snapshot
    Remote,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum CompletionShell {
    Bash,
    Zsh,
    Fish,
}
