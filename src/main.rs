//! Library Admin Console - command-line front end

mod cli;

use std::process::ExitCode;

use anyhow::{bail, Context};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::{
    AuthorsCommand, BookFields, BooksCommand, CategoriesCommand, Cli, Command, DeleteArgs, PublishersCommand,
    UsersCommand,
};
use library_admin::{
    config::{AppConfig, LoggingConfig},
    models::{Author, Book, Category, CreateAuthor, CreateUser, ListResponse, Publisher, UpdateAuthor, UpdateUser, User},
    services::{book_form::BookForm, delete_each, DeleteReport},
    AppError, AppState,
};

#[tokio::main]
async fn main() -> ExitCode {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return ExitCode::from(AppError::Config(e).exit_code() as u8);
        }
    };

    init_tracing(&config.logging);
    tracing::debug!("Library admin console v{}", env!("CARGO_PKG_VERSION"));

    match run(cli, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            let code = e.downcast_ref::<AppError>().map(AppError::exit_code).unwrap_or(1);
            ExitCode::from(code as u8)
        }
    }
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| format!("library_admin={}", logging.level).into());

    let registry = tracing_subscriber::registry().with(filter);
    if logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

async fn run(cli: Cli, config: AppConfig) -> anyhow::Result<()> {
    let email = cli.admin_email.or_else(|| config.auth.email.clone());
    let password = cli.admin_password.or_else(|| config.auth.password.clone());
    let page_size = config.listing.page_size;

    let state = AppState::new(config)?;

    let (Some(email), Some(password)) = (email, password) else {
        bail!("No credentials: pass --admin-email/--admin-password or set LIBRARY_ADMIN_EMAIL/LIBRARY_ADMIN_PASSWORD");
    };
    let greeting = state.services.auth.login(&email, &password).await?;

    match cli.command {
        Command::Login => {
            if let Some(message) = greeting {
                println!("{}", message);
            }
            match state.services.auth.current_user() {
                Some(user) => println!(
                    "Logged in as {} <{}> ({})",
                    user.name,
                    user.email,
                    user.role.as_deref().unwrap_or("user")
                ),
                None => println!("Logged in as {}", email),
            }
        }
        Command::Books { cmd } => books(&state, cmd, page_size).await?,
        Command::Authors { cmd } => authors(&state, cmd, page_size).await?,
        Command::Categories { cmd } => categories(&state, cmd, page_size).await?,
        Command::Publishers { cmd } => publishers(&state, cmd, page_size).await?,
        Command::Users { cmd } => users(&state, cmd, page_size).await?,
    }

    state.services.auth.logout();
    Ok(())
}

async fn books(state: &AppState, cmd: BooksCommand, page_size: u32) -> anyhow::Result<()> {
    let catalog = &state.services.catalog;

    match cmd {
        BooksCommand::List { page, search } => {
            let limit = page.limit.unwrap_or(page_size);
            let list = catalog.list_books(page.page, limit, search.as_deref()).await?;
            print_books(&list, page.page, limit);
        }
        BooksCommand::Show { id } => {
            let book = catalog.get_book(&id).await?;
            print_book_detail(&book);
        }
        BooksCommand::Create { fields } => {
            let form = catalog.open_create_form().await?;
            fill_and_submit(state, form, fields, page_size).await?;
        }
        BooksCommand::Update { id, fields } => {
            let form = catalog
                .open_edit_form(&id, None)
                .await
                .with_context(|| format!("Could not open book {} for editing", id))?;
            fill_and_submit(state, form, fields, page_size).await?;
        }
        BooksCommand::Delete(args) => {
            confirm(&args, "book")?;
            let report = delete_each(&args.ids, |id| async move { catalog.delete_book(&id).await }).await;
            finish_delete(report, "book")?;
        }
    }
    Ok(())
}

/// Apply the flags to an open book form, submit it and show the refreshed first page
async fn fill_and_submit(state: &AppState, form: BookForm, fields: BookFields, page_size: u32) -> anyhow::Result<()> {
    for warning in form.warnings() {
        eprintln!("warning: {}", warning);
    }

    form.edit(|values| fields.apply(values))?;

    let references = form.references();
    let values = form.values();
    for id in &values.author_ids {
        if !references.authors.items.is_empty() && !references.authors.contains(id) {
            eprintln!("warning: author {} is not in the author list", id);
        }
    }
    for id in &values.category_ids {
        if !references.categories.items.is_empty() && !references.categories.contains(id) {
            eprintln!("warning: category {} is not in the category list", id);
        }
    }

    let catalog = state.services.catalog.clone();
    let outcome = form
        .submit(|| async move {
            let list = catalog.list_books(1, page_size, None).await?;
            print_books(&list, 1, page_size);
            Ok(())
        })
        .await?;

    let action = if outcome.mode.is_update() { "Updated" } else { "Created" };
    match outcome.book.as_ref().and_then(|b| b.key.get()) {
        Some(id) => println!("{} \"{}\" ({})", action, outcome.payload.title, id),
        None => println!("{} \"{}\"", action, outcome.payload.title),
    }
    Ok(())
}

async fn authors(state: &AppState, cmd: AuthorsCommand, page_size: u32) -> anyhow::Result<()> {
    let service = &state.services.authors;

    match cmd {
        AuthorsCommand::List { page, name, sort_by } => {
            let limit = page.limit.unwrap_or(page_size);
            let list = service
                .list(page.page, limit, name.as_deref(), sort_by.as_deref())
                .await?;
            print_page(&list, page.page, limit, |a: &Author| {
                format!("{}  {}", a.name, a.email.as_deref().unwrap_or(""))
            }, |a| a.key.get());
        }
        AuthorsCommand::Show { id } => {
            let author = service.get(&id).await?;
            println!("{}", serde_json::to_string_pretty(&author)?);
        }
        AuthorsCommand::Create { name, phone, email } => {
            let created = service.create(CreateAuthor { name, phone, email }).await?;
            print_saved("author", created.as_ref().and_then(|a| a.key.get()));
        }
        AuthorsCommand::Update { id, name, phone, email } => {
            service.update(&id, UpdateAuthor { name, phone, email }).await?;
            print_saved("author", Some(&id));
        }
        AuthorsCommand::Delete(args) => {
            confirm(&args, "author")?;
            let report = delete_each(&args.ids, |id| async move { service.delete(&id).await }).await;
            finish_delete(report, "author")?;
        }
    }
    Ok(())
}

async fn categories(state: &AppState, cmd: CategoriesCommand, page_size: u32) -> anyhow::Result<()> {
    let service = &state.services.categories;

    match cmd {
        CategoriesCommand::List { page, name, sort_by } => {
            let limit = page.limit.unwrap_or(page_size);
            let list = service
                .list(page.page, limit, name.as_deref(), sort_by.as_deref())
                .await?;
            print_page(&list, page.page, limit, |c: &Category| c.name.clone(), |c| c.key.get());
        }
        CategoriesCommand::Show { id } => {
            let category = service.get(&id).await?;
            println!("{}", serde_json::to_string_pretty(&category)?);
        }
        CategoriesCommand::Create { name } => {
            let created = service.create(&name).await?;
            print_saved("category", created.as_ref().and_then(|c| c.key.get()));
        }
        CategoriesCommand::BulkCreate { names } => {
            let created = service.create_bulk(&names).await?;
            if created.is_empty() {
                println!("Categories submitted");
            }
            for category in &created {
                println!("{}  {}", category.key.get().unwrap_or("-"), category.name);
            }
        }
        CategoriesCommand::Update { id, name } => {
            service.rename(&id, &name).await?;
            print_saved("category", Some(&id));
        }
        CategoriesCommand::Delete(args) => {
            confirm(&args, "category")?;
            let report = delete_each(&args.ids, |id| async move { service.delete(&id).await }).await;
            finish_delete(report, "category")?;
        }
    }
    Ok(())
}

async fn publishers(state: &AppState, cmd: PublishersCommand, page_size: u32) -> anyhow::Result<()> {
    let service = &state.services.publishers;

    match cmd {
        PublishersCommand::List { page, name, sort_by } => {
            let limit = page.limit.unwrap_or(page_size);
            let list = service
                .list(page.page, limit, name.as_deref(), sort_by.as_deref())
                .await?;
            print_page(&list, page.page, limit, |p: &Publisher| p.name.clone(), |p| p.key.get());
        }
        PublishersCommand::Show { id } => {
            let publisher = service.get(&id).await?;
            println!("{}", serde_json::to_string_pretty(&publisher)?);
        }
        PublishersCommand::Create { name } => {
            let created = service.create(&name).await?;
            print_saved("publisher", created.as_ref().and_then(|p| p.key.get()));
        }
        PublishersCommand::Update { id, name } => {
            service.rename(&id, &name).await?;
            print_saved("publisher", Some(&id));
        }
        PublishersCommand::Delete(args) => {
            confirm(&args, "publisher")?;
            let report = delete_each(&args.ids, |id| async move { service.delete(&id).await }).await;
            finish_delete(report, "publisher")?;
        }
    }
    Ok(())
}

async fn users(state: &AppState, cmd: UsersCommand, page_size: u32) -> anyhow::Result<()> {
    let service = &state.services.users;

    match cmd {
        UsersCommand::List { page, keyword } => {
            let limit = page.limit.unwrap_or(page_size);
            let list = service.list(page.page, limit, keyword.as_deref()).await?;
            print_page(&list, page.page, limit, |u: &User| {
                format!("{}  {}  {}", u.name, u.email, u.role.as_deref().unwrap_or("user"))
            }, |u| u.key.get());
        }
        UsersCommand::Show { id } => {
            let user = service.get(&id).await?;
            println!("{}", serde_json::to_string_pretty(&user)?);
        }
        UsersCommand::Create { name, email, password, role, address } => {
            let created = service
                .create(CreateUser { name, email, password, role, address })
                .await?;
            print_saved("user", created.as_ref().and_then(|u| u.key.get()));
        }
        UsersCommand::Update { id, name, email, password, role, address } => {
            service
                .update(&id, UpdateUser { name, email, password, role, address })
                .await?;
            print_saved("user", Some(&id));
        }
        UsersCommand::Delete(args) => {
            confirm(&args, "user")?;
            let report = delete_each(&args.ids, |id| async move { service.delete(&id).await }).await;
            finish_delete(report, "user")?;
        }
    }
    Ok(())
}

fn confirm(args: &DeleteArgs, kind: &str) -> anyhow::Result<()> {
    if !args.yes {
        bail!(
            "Refusing to delete {} {}(s) without --yes: {}",
            args.ids.len(),
            kind,
            args.ids.join(", ")
        );
    }
    Ok(())
}

fn finish_delete(report: DeleteReport, kind: &str) -> anyhow::Result<()> {
    for id in &report.deleted {
        println!("Deleted {} {}", kind, id);
    }
    for (id, e) in &report.failed {
        eprintln!("Could not delete {} {}: {}", kind, id, e);
    }
    if !report.is_success() {
        bail!("{} of {} deletions failed", report.failed.len(), report.failed.len() + report.deleted.len());
    }
    Ok(())
}

fn print_saved(kind: &str, id: Option<&str>) {
    match id {
        Some(id) => println!("Saved {} {}", kind, id),
        None => println!("Saved {}", kind),
    }
}

fn print_page<T>(list: &ListResponse<T>, page: u32, limit: u32, line: impl Fn(&T) -> String, id: impl Fn(&T) -> Option<&str>) {
    if list.items.is_empty() {
        println!("No records");
    }
    for item in &list.items {
        println!("{}  {}", id(item).unwrap_or("-"), line(item));
    }
    println!("Page {} of {}", page, list.total_pages(limit).max(1));
}

fn print_books(list: &ListResponse<Book>, page: u32, limit: u32) {
    print_page(list, page, limit, |b: &Book| {
        format!(
            "{}  by {}  [{}]  {}  {}  qty {}  {}",
            b.title.as_deref().unwrap_or("(untitled)"),
            b.author_labels().join(", "),
            b.category_labels().join(", "),
            b.publisher_label().unwrap_or_default(),
            b.year_published.map(|y| y.to_string()).unwrap_or_default(),
            b.quantity.unwrap_or(0),
            b.price.map(|p| p.to_string()).unwrap_or_default(),
        )
    }, |b| b.key.get());
}

fn print_book_detail(book: &Book) {
    println!("Id:         {}", book.key.get().unwrap_or("-"));
    println!("Title:      {}", book.title.as_deref().unwrap_or(""));
    println!("Authors:    {}", book.author_labels().join(", "));
    println!("Categories: {}", book.category_labels().join(", "));
    println!("Publisher:  {}", book.publisher_label().unwrap_or_default());
    println!("Year:       {}", book.year_published.map(|y| y.to_string()).unwrap_or_default());
    println!("ISBN:       {}", book.isbn.as_deref().unwrap_or(""));
    println!("Quantity:   {}", book.quantity.unwrap_or(0));
    println!("Price:      {}", book.price.map(|p| p.to_string()).unwrap_or_default());
}
