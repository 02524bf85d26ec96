//! Command-line arguments.

use clap::{Args, Parser, Subcommand};
use shared_types::Family;
use sp_01_batch_builder::{
    CategoryPayload, EntityPayload, EnvelopePayload, PartPayload, SupplierPayload,
};

/// Sparts ledger client
#[derive(Parser, Debug)]
#[command(name = "sparts")]
#[command(about = "Create, relate and inspect supply-chain entities on the ledger")]
pub struct Cli {
    /// REST API URL (overrides SPARTS_REST_API_URL)
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// Basic auth user (overrides SPARTS_AUTH_USER)
    #[arg(long, global = true)]
    pub auth_user: Option<String>,

    /// Basic auth password (overrides SPARTS_AUTH_PASSWORD)
    #[arg(long, global = true)]
    pub auth_password: Option<String>,

    /// Seconds to wait for the batch to commit
    #[arg(long, global = true, value_name = "SECS")]
    pub wait: Option<u64>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a secp256k1 signing key
    Keygen,

    /// Show the status of a submitted batch
    Status { batch_id: String },

    #[command(subcommand)]
    Category(CategoryCommand),

    #[command(subcommand)]
    Supplier(SupplierCommand),

    #[command(subcommand)]
    Part(PartCommand),

    #[command(subcommand)]
    Envelope(EnvelopeCommand),
}

/// What a family subcommand asks for.
pub enum EntityAction {
    Write(Box<dyn EntityPayload>),
    Show(Family, String),
    List(Family),
}

#[derive(Subcommand, Debug)]
pub enum CategoryCommand {
    /// Create a category
    Create {
        category_id: String,
        category_name: String,
        description: String,
    },
    Show {
        category_id: String,
    },
    List,
}

impl CategoryCommand {
    pub fn into_action(self) -> EntityAction {
        match self {
            Self::Create {
                category_id,
                category_name,
                description,
            } => EntityAction::Write(Box::new(CategoryPayload::new(
                category_id,
                category_name,
                description,
            ))),
            Self::Show { category_id } => EntityAction::Show(Family::Category, category_id),
            Self::List => EntityAction::List(Family::Category),
        }
    }
}

#[derive(Args, Debug)]
pub struct SupplierFields {
    pub supplier_id: String,
    #[arg(long, default_value = "")]
    pub short_id: String,
    #[arg(long, default_value = "")]
    pub name: String,
    #[arg(long, default_value = "")]
    pub passwd: String,
    #[arg(long, default_value = "")]
    pub supplier_url: String,
}

#[derive(Subcommand, Debug)]
pub enum SupplierCommand {
    /// Create a supplier
    Create(SupplierFields),
    /// Relate a part to a supplier
    AddPart {
        supplier_id: String,
        part_id: String,
    },
    Show {
        supplier_id: String,
    },
    List,
}

impl SupplierCommand {
    pub fn into_action(self) -> EntityAction {
        match self {
            Self::Create(fields) => EntityAction::Write(Box::new(SupplierPayload {
                short_id: fields.short_id,
                supplier_name: fields.name,
                passwd: fields.passwd,
                supplier_url: fields.supplier_url,
                ..SupplierPayload::new(fields.supplier_id)
            })),
            Self::AddPart {
                supplier_id,
                part_id,
            } => EntityAction::Write(Box::new(SupplierPayload::add_part(supplier_id, part_id))),
            Self::Show { supplier_id } => EntityAction::Show(Family::Supplier, supplier_id),
            Self::List => EntityAction::List(Family::Supplier),
        }
    }
}

#[derive(Args, Debug)]
pub struct PartFields {
    pub pt_id: String,
    #[arg(long, default_value = "")]
    pub name: String,
    #[arg(long, default_value = "")]
    pub checksum: String,
    #[arg(long = "part-version", default_value = "")]
    pub version: String,
    #[arg(long, default_value = "")]
    pub src_uri: String,
    #[arg(long, default_value = "")]
    pub licensing: String,
    #[arg(long, default_value = "")]
    pub label: String,
    #[arg(long, default_value = "")]
    pub description: String,
}

#[derive(Subcommand, Debug)]
pub enum PartCommand {
    /// Create a part
    Create(PartFields),
    /// Relate an envelope to a part
    AddEnvelope { pt_id: String, envelope_id: String },
    /// Relate a category to a part
    AddCategory { pt_id: String, category_id: String },
    /// Relate a supplier to a part
    AddSupplier { pt_id: String, supplier_id: String },
    Show {
        pt_id: String,
    },
    List,
}

impl PartCommand {
    pub fn into_action(self) -> EntityAction {
        match self {
            Self::Create(fields) => EntityAction::Write(Box::new(PartPayload {
                pt_name: fields.name,
                checksum: fields.checksum,
                version: fields.version,
                src_uri: fields.src_uri,
                licensing: fields.licensing,
                label: fields.label,
                description: fields.description,
                ..PartPayload::new(fields.pt_id)
            })),
            Self::AddEnvelope { pt_id, envelope_id } => {
                EntityAction::Write(Box::new(PartPayload::add_envelope(pt_id, envelope_id)))
            }
            Self::AddCategory { pt_id, category_id } => {
                EntityAction::Write(Box::new(PartPayload::add_category(pt_id, category_id)))
            }
            Self::AddSupplier { pt_id, supplier_id } => {
                EntityAction::Write(Box::new(PartPayload::add_supplier(pt_id, supplier_id)))
            }
            Self::Show { pt_id } => EntityAction::Show(Family::Part, pt_id),
            Self::List => EntityAction::List(Family::Part),
        }
    }
}

#[derive(Args, Debug)]
pub struct EnvelopeFields {
    pub artifact_id: String,
    #[arg(long, default_value = "")]
    pub short_id: String,
    #[arg(long, default_value = "")]
    pub name: String,
    #[arg(long = "type", default_value = "")]
    pub artifact_type: String,
    #[arg(long, default_value = "")]
    pub checksum: String,
    #[arg(long, default_value = "")]
    pub path: String,
    #[arg(long, default_value = "")]
    pub uri: String,
    #[arg(long, default_value = "")]
    pub label: String,
    #[arg(long, default_value = "")]
    pub openchain: String,
}

#[derive(Subcommand, Debug)]
pub enum EnvelopeCommand {
    /// Create an envelope
    Create(EnvelopeFields),
    /// Relate a sub-artifact to an envelope
    AddArtifact {
        artifact_id: String,
        sub_artifact_id: String,
    },
    Show {
        artifact_id: String,
    },
    List,
}

impl EnvelopeCommand {
    pub fn into_action(self) -> EntityAction {
        match self {
            Self::Create(fields) => EntityAction::Write(Box::new(EnvelopePayload {
                short_id: fields.short_id,
                artifact_name: fields.name,
                artifact_type: fields.artifact_type,
                artifact_checksum: fields.checksum,
                path: fields.path,
                uri: fields.uri,
                label: fields.label,
                openchain: fields.openchain,
                ..EnvelopePayload::new(fields.artifact_id)
            })),
            Self::AddArtifact {
                artifact_id,
                sub_artifact_id,
            } => EntityAction::Write(Box::new(EnvelopePayload::add_artifact(
                artifact_id,
                sub_artifact_id,
            ))),
            Self::Show { artifact_id } => EntityAction::Show(Family::Envelope, artifact_id),
            Self::List => EntityAction::List(Family::Envelope),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("sparts").chain(args.iter().copied())).unwrap()
    }

    fn written(action: EntityAction) -> Box<dyn EntityPayload> {
        match action {
            EntityAction::Write(payload) => payload,
            _ => panic!("expected a write"),
        }
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let cli = parse(&["part", "list", "--url", "ledger:8008", "--wait", "5", "-vv"]);
        assert_eq!(cli.url.as_deref(), Some("ledger:8008"));
        assert_eq!(cli.wait, Some(5));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_part_create_fields() {
        let cli = parse(&[
            "part", "create", "p1", "--name", "zlib", "--part-version", "1.3", "--licensing", "Zlib",
        ]);
        let Command::Part(command) = cli.command else {
            panic!("expected part command");
        };
        let payload = written(command.into_action());

        assert_eq!(payload.family(), Family::Part);
        assert_eq!(
            payload.values(),
            vec!["p1", "zlib", "", "1.3", "", "Zlib", "", "", "create", "", "", ""]
        );
    }

    #[test]
    fn test_relation_subcommands() {
        let cli = parse(&["supplier", "add-part", "s1", "p1"]);
        let Command::Supplier(command) = cli.command else {
            panic!("expected supplier command");
        };
        let payload = written(command.into_action());
        assert_eq!(payload.values()[5..], ["AddPart", "p1"]);

        let cli = parse(&["envelope", "add-artifact", "e1", "e2"]);
        let Command::Envelope(command) = cli.command else {
            panic!("expected envelope command");
        };
        let payload = written(command.into_action());
        assert_eq!(payload.entity_id(), "e1");
        assert_eq!(payload.values()[9..], ["AddArtifact", "e2"]);
    }

    #[test]
    fn test_show_and_list() {
        let cli = parse(&["category", "show", "c1"]);
        let Command::Category(command) = cli.command else {
            panic!("expected category command");
        };
        assert!(matches!(
            command.into_action(),
            EntityAction::Show(Family::Category, id) if id == "c1"
        ));

        let cli = parse(&["envelope", "list"]);
        let Command::Envelope(command) = cli.command else {
            panic!("expected envelope command");
        };
        assert!(matches!(command.into_action(), EntityAction::List(Family::Envelope)));
    }
}
