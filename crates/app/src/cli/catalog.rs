use clap::{Args, Subcommand};
use iara::pricing::brl;
use iara_app::{
    catalog::{CatalogQuery, CatalogView, Game, Tag},
    context::AppContext,
};

use super::describe;

#[derive(Debug, Args)]
pub(crate) struct CatalogCommand {
    #[command(subcommand)]
    command: CatalogSubcommand,
}

#[derive(Debug, Subcommand)]
enum CatalogSubcommand {
    /// Search games, one page at a time
    Search(SearchArgs),

    /// Show one game in full
    Show(ShowArgs),

    /// List genres
    Genres,

    /// List platforms
    Platforms,
}

#[derive(Debug, Args)]
struct SearchArgs {
    /// Free-text search
    #[arg(long, short)]
    query: Option<String>,

    /// Genre ids or slugs, comma separated
    #[arg(long)]
    genres: Option<String>,

    /// Platform ids, comma separated
    #[arg(long)]
    platforms: Option<String>,

    /// Sort order, e.g. `-rating` or `name`
    #[arg(long, default_value = "-rating")]
    ordering: String,

    /// Page number, starting at 1
    #[arg(long, default_value_t = 1)]
    page: u32,

    /// Results per page
    #[arg(long)]
    page_size: Option<u32>,
}

#[derive(Debug, Args)]
struct ShowArgs {
    /// Game id
    id: u64,
}

pub(crate) async fn run(context: &AppContext, command: CatalogCommand) -> Result<(), String> {
    match command.command {
        CatalogSubcommand::Search(args) => search(context, args).await,
        CatalogSubcommand::Show(args) => show(context, args).await,
        CatalogSubcommand::Genres => {
            let genres = context
                .catalog
                .genres()
                .await
                .map_err(|error| format!("failed to list genres: {}", describe(&error)))?;

            print_tags(&genres);

            Ok(())
        }
        CatalogSubcommand::Platforms => {
            let platforms = context
                .catalog
                .platforms()
                .await
                .map_err(|error| format!("failed to list platforms: {}", describe(&error)))?;

            print_tags(&platforms);

            Ok(())
        }
    }
}

async fn search(context: &AppContext, args: SearchArgs) -> Result<(), String> {
    let mut query = CatalogQuery::new();

    query.set_search(args.query);
    query.set_genres(args.genres);
    query.set_platforms(args.platforms);
    query.set_ordering(Some(args.ordering));

    if let Some(page_size) = args.page_size {
        query.set_page_size(page_size);
    }

    query.go_to_page(args.page);

    let view = CatalogView::from_result(query.fetch(context.catalog.as_ref()).await);

    if let Some(error) = view.error {
        return Err(error);
    }

    let cart = context
        .cart()
        .map_err(|error| format!("failed to load cart: {}", describe(&error)))?;

    if view.result.items.is_empty() {
        println!("no games found");
        return Ok(());
    }

    for game in &view.result.items {
        let marker = if cart.is_in_cart(game.id) { "*" } else { " " };

        println!(
            "{marker} {:>8}  {}  {}  ({:.1})",
            game.id,
            brl(game.price()),
            game.name,
            game.rating
        );
    }

    println!();
    println!(
        "page {} · {} games{}",
        query.page(),
        view.result.total_count,
        if query.has_next_page() {
            " · more with --page"
        } else {
            ""
        }
    );

    Ok(())
}

async fn show(context: &AppContext, args: ShowArgs) -> Result<(), String> {
    let game = context
        .catalog
        .game(args.id)
        .await
        .map_err(|error| format!("failed to load game {}: {}", args.id, describe(&error)))?;

    print_game(&game);

    Ok(())
}

fn print_game(game: &Game) {
    println!("id: {}", game.id);
    println!("name: {}", game.name);
    println!("price: {}", brl(game.price()));
    println!("rating: {:.2} / {}", game.rating, game.rating_top);
    println!(
        "released: {}",
        game.released.as_deref().unwrap_or("unknown")
    );
    println!(
        "genres: {}",
        game.genres
            .iter()
            .map(|genre| genre.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!("platforms: {}", game.platform_names().join(", "));

    if let Some(metacritic) = game.metacritic {
        println!("metacritic: {metacritic}");
    }

    if let Some(esrb) = &game.esrb_rating {
        println!("esrb: {}", esrb.name);
    }

    if let Some(description) = &game.description_raw {
        println!();
        println!("{description}");
    }
}

fn print_tags(tags: &[Tag]) {
    for tag in tags {
        println!("{:>6}  {:<24}  {}", tag.id, tag.slug, tag.name);
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use testresult::TestResult;

    use super::*;

    #[derive(Debug, Parser)]
    struct SearchOnly {
        #[command(flatten)]
        args: SearchArgs,
    }

    #[test]
    fn search_sorts_by_rating_by_default() -> TestResult {
        let SearchOnly { args } = SearchOnly::try_parse_from(["search"])?;

        assert_eq!(args.ordering, "-rating");
        assert_eq!(args.page, 1);

        let SearchOnly { args } = SearchOnly::try_parse_from(["search", "--ordering", "name"])?;

        assert_eq!(args.ordering, "name");

        Ok(())
    }
}
