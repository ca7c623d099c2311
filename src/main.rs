//! Binder Organizer - Pokemon TCG collection organizer
//!
//! CLI over the library: catalog browsing, custom-set management, binder
//! capacity planning and placeholder-PDF export.

use std::path::PathBuf;

use binder_organizer::{
    binder, catalog::CatalogClient, expansion, layout, pdf, store::CustomStore,
    suggest::SuggestionClient, Card, DisplayMode, ListSource, Orientation, PaperSize, Result,
    Variation,
};
use clap::{Parser, Subcommand};

/// Pokemon TCG collection organizer - sets, binders and printable placeholders
#[derive(Parser, Debug)]
#[command(name = "binder_organizer")]
#[command(version, about, long_about = None)]
struct Args {
    /// Directory holding the custom-set store
    #[arg(long, default_value_t = default_data_dir())]
    data_dir: String,

    #[command(subcommand)]
    command: Command,
}

/// Returns the default store directory: ~/.local/share/binder_organizer
fn default_data_dir() -> String {
    CustomStore::default_dir().to_string_lossy().to_string()
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List official sets from the catalog, newest first
    Sets {
        #[arg(long, default_value_t = 1)]
        page: usize,
        #[arg(long, default_value_t = 50)]
        page_size: usize,
    },

    /// List the cards of a catalog or custom set
    Cards {
        set_id: String,
        /// Expand to the master set (reverse-holo variants included)
        #[arg(long)]
        master: bool,
        /// Drop secret rares and other cards past the printed total
        #[arg(long)]
        exclude_nonstandard: bool,
        /// Read the set from the local store instead of the catalog
        #[arg(long)]
        custom: bool,
    },

    /// Search catalog cards by illustrator name
    Artist { name: String },

    /// Binder capacity stats and a product recommendation
    Binder {
        /// Number of cards to store
        #[arg(required_unless_present = "set_id", conflicts_with = "set_id")]
        count: Option<u32>,
        /// Count the cards of this set instead of giving a number
        #[arg(long = "set", id = "set_id")]
        set_id: Option<String>,
        /// Read the set from the local store instead of the catalog
        #[arg(long, requires = "set_id")]
        custom: bool,
        /// Count the master set (reverse-holo variants included)
        #[arg(long, requires = "set_id")]
        master: bool,
        /// Pockets per binder page
        #[arg(long, default_value_t = 9, value_parser = clap::value_parser!(u32).range(1..))]
        pockets: u32,
    },

    /// Search cards by name across one or more catalog sets
    Search {
        query: String,
        /// Set id to search in (repeatable)
        #[arg(long = "set", required = true)]
        sets: Vec<String>,
    },

    /// Manage user-created sets and cards
    #[command(subcommand)]
    Custom(CustomCommand),

    /// Export a printable placeholder PDF for a set
    Print {
        set_id: String,
        /// Read the set from the local store instead of the catalog
        #[arg(long)]
        custom: bool,
        /// Expand to the master set before printing
        #[arg(long)]
        master: bool,
        /// Drop secret rares and other cards past the printed total
        #[arg(long)]
        exclude_nonstandard: bool,
        /// Paper size: a4, letter or legal
        #[arg(long, default_value = "a4")]
        paper: PaperSize,
        /// Page orientation: portrait or landscape
        #[arg(long, default_value = "portrait")]
        orientation: Orientation,
        /// Desaturate all ink to save color toner
        #[arg(long)]
        grayscale: bool,
        /// Omit the dashed cut-line borders
        #[arg(long)]
        no_cut_lines: bool,
        /// Output file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Suggest binder brands for a collection (requires GEMINI_API_KEY)
    Suggest {
        /// Number of cards to store
        count: u32,
        #[arg(long, default_value_t = 9, value_parser = clap::value_parser!(u32).range(1..))]
        pockets: u32,
    },
}

#[derive(Subcommand, Debug)]
enum CustomCommand {
    /// Create a new empty custom set
    Create {
        name: String,
        #[arg(long, default_value = "Custom")]
        series: String,
    },
    /// List all custom sets
    List,
    /// Rename a custom set or change its series
    Edit {
        set_id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        series: Option<String>,
    },
    /// Delete a custom set and all its cards
    Delete { set_id: String },
    /// Add a card to a custom set
    AddCard {
        set_id: String,
        name: String,
        number: String,
        #[arg(long, default_value = "Common")]
        rarity: String,
        /// Track this card as a reverse holo
        #[arg(long)]
        reverse: bool,
        #[arg(long, default_value = "")]
        image_url: String,
    },
    /// Remove a card by id
    RemoveCard { card_id: String },
    /// Write a backup snapshot of all custom data
    Export {
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Replace all custom data with a previously exported snapshot
    Import { input: PathBuf },
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if let Err(e) = run(args).await {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    let store = CustomStore::new(&args.data_dir);

    match args.command {
        Command::Sets { page, page_size } => {
            let client = CatalogClient::new();
            let result = client.get_sets(page, page_size).await?;

            println!(
                "Page {} of {} physical sets:",
                result.page, result.total_count
            );
            for set in &result.sets {
                println!(
                    "  {:<12} {:<40} {:>4} cards ({} printed)",
                    set.id, set.name, set.total, set.printed_total
                );
            }
        }

        Command::Cards {
            set_id,
            master,
            exclude_nonstandard,
            custom,
        } => {
            let (cards, source) = load_cards(&store, &set_id, custom).await?;
            let mode = if master {
                DisplayMode::Master
            } else {
                DisplayMode::Standard
            };
            let entries = expansion::expand(&cards, mode, !exclude_nonstandard, source);

            println!("{} entries:", entries.len());
            for entry in &entries {
                println!(
                    "  #{:<6} {:<32} {:<12} {}",
                    entry.card.number,
                    entry.card.name,
                    entry.variation.as_str(),
                    entry.card.rarity
                );
            }
        }

        Command::Artist { name } => {
            let client = CatalogClient::new();
            // The illustrator endpoint returns bare ids; the full set list
            // provides the metadata to enrich and filter against.
            let known_sets = client.get_sets(1, usize::MAX).await?.sets;
            let cards = client.get_cards_by_artist(&name, &known_sets).await?;

            println!("{} cards illustrated by {}:", cards.len(), name);
            for card in &cards {
                println!("  {:<14} {:<32} {}", card.id, card.name, card.set.name);
            }
        }

        Command::Binder {
            count,
            set_id,
            custom,
            master,
            pockets,
        } => {
            let count = match (count, set_id) {
                (Some(count), _) => count,
                (None, Some(set_id)) => {
                    let (cards, source) = load_cards(&store, &set_id, custom).await?;
                    let mode = if master {
                        DisplayMode::Master
                    } else {
                        DisplayMode::Standard
                    };
                    expansion::expand(&cards, mode, true, source).len() as u32
                }
                (None, None) => unreachable!("clap enforces count or --set"),
            };
            print_binder_report(count, pockets);
        }

        Command::Search { query, sets } => {
            let client = CatalogClient::new();
            let cards = client.search_cards_in_sets(&query, &sets).await?;

            println!("{} match(es) for \"{query}\":", cards.len());
            for card in &cards {
                println!("  {:<14} {:<32} {}", card.id, card.name, card.set.name);
            }
        }

        Command::Custom(command) => run_custom(&store, command)?,

        Command::Print {
            set_id,
            custom,
            master,
            exclude_nonstandard,
            paper,
            orientation,
            grayscale,
            no_cut_lines,
            output,
        } => {
            let (cards, source) = load_cards(&store, &set_id, custom).await?;
            let mode = if master {
                DisplayMode::Master
            } else {
                DisplayMode::Standard
            };
            let entries = expansion::expand(&cards, mode, !exclude_nonstandard, source);
            let pages = layout::plan_pages(entries, paper, orientation);

            let options = pdf::PrintOptions {
                grayscale,
                show_cut_lines: !no_cut_lines,
                ..Default::default()
            };
            let output = output.unwrap_or_else(|| {
                PathBuf::from(format!("placeholders-{}-{}.pdf", paper, orientation))
            });

            pdf::generate_pdf(&pages, paper, orientation, &options, &output)?;
            println!("Exported {} page(s) to {}", pages.len(), output.display());
        }

        Command::Suggest { count, pockets } => {
            let stats = binder::compute_binder_stats(count, pockets);
            let client = SuggestionClient::from_env();
            let text = client
                .suggest_binder_brands(pockets, count, stats.pages_needed)
                .await?;
            println!("{text}");
        }
    }

    Ok(())
}

fn run_custom(store: &CustomStore, command: CustomCommand) -> Result<()> {
    match command {
        CustomCommand::Create { name, series } => {
            let set = store.create_set(&name, &series)?;
            println!("Created {} ({})", set.set.name, set.set.id);
        }
        CustomCommand::List => {
            let sets = store.list_sets();
            println!("{} custom set(s):", sets.len());
            for set in &sets {
                println!(
                    "  {:<24} {:<32} {:>4} cards",
                    set.set.id, set.set.name, set.set.total
                );
            }
        }
        CustomCommand::Edit {
            set_id,
            name,
            series,
        } => {
            let set = store.update_set(&set_id, name.as_deref(), series.as_deref())?;
            println!("Updated {} ({})", set.set.name, set.set.id);
        }
        CustomCommand::Delete { set_id } => {
            store.delete_set(&set_id)?;
            println!("Deleted {set_id}");
        }
        CustomCommand::AddCard {
            set_id,
            name,
            number,
            rarity,
            reverse,
            image_url,
        } => {
            let variation = reverse.then_some(Variation::Reverse);
            let card = store.add_card(&set_id, &name, &number, &rarity, &image_url, None, variation)?;
            println!("Added {} as {}", card.card.name, card.card.id);
        }
        CustomCommand::RemoveCard { card_id } => {
            store.remove_card(&card_id)?;
            println!("Removed {card_id}");
        }
        CustomCommand::Export { output } => {
            let snapshot = store.export()?;
            match output {
                Some(path) => {
                    std::fs::write(&path, snapshot)?;
                    println!("Snapshot written to {}", path.display());
                }
                None => println!("{snapshot}"),
            }
        }
        CustomCommand::Import { input } => {
            let snapshot = std::fs::read_to_string(&input)?;
            store.import(&snapshot)?;
            println!("Snapshot imported from {}", input.display());
        }
    }
    Ok(())
}

/// Load the member cards of either a catalog set or a locally stored custom
/// set, together with the list source the expansion engine needs
async fn load_cards(
    store: &CustomStore,
    set_id: &str,
    custom: bool,
) -> Result<(Vec<Card>, ListSource)> {
    if custom {
        let cards: Vec<Card> = store
            .cards_by_set(set_id)
            .into_iter()
            .map(|c| c.card)
            .collect();
        Ok((cards, ListSource::UserCurated))
    } else {
        let client = CatalogClient::new();
        let cards = client.get_cards_by_set(set_id).await?;
        Ok((cards, ListSource::Catalog))
    }
}

/// Pages/slots arithmetic plus the preset table for the chosen pocket count
fn print_binder_report(count: u32, pockets: u32) {
    let stats = binder::compute_binder_stats(count, pockets);

    println!("{count} cards in {pockets}-pocket pages:");
    println!("  pages needed: {}", stats.pages_needed);
    println!("  total slots:  {}", stats.total_slots);
    println!("  empty slots:  {}", stats.empty_slots);

    let presets = binder::presets_for_pockets(pockets);
    if presets.is_empty() {
        println!("No known {pockets}-pocket binder products.");
        return;
    }

    println!("Common {pockets}-pocket binders:");
    for preset in &presets {
        if preset.slots >= count {
            println!(
                "  {:<20} {:>4} slots ({} pages) - fits, {} slots spare",
                preset.name,
                preset.slots,
                preset.pages,
                preset.slots - count
            );
        } else {
            println!(
                "  {:<20} {:>4} slots ({} pages) - short by {} slots",
                preset.name,
                preset.slots,
                preset.pages,
                count - preset.slots
            );
        }
    }

    match binder::recommend_preset(count, pockets) {
        Some(preset) => println!(
            "Best fit: {} ({} slots), using {} of {} pages",
            preset.name, preset.slots, stats.pages_needed, preset.pages
        ),
        None => println!(
            "Too many cards for a single binder; you need at least {} slots.",
            stats.total_slots
        ),
    }
}
