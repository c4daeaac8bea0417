use clap::{Args, Parser, Subcommand};

use library_admin::models::{BookFormValues, Role};

#[derive(Parser, Debug)]
#[command(name = "library-admin", version, about = "Library administration console")]
pub struct Cli {
    /// Administrator email; overrides the configured one
    #[arg(long = "admin-email", global = true)]
    pub admin_email: Option<String>,

    /// Administrator password; overrides the configured one
    #[arg(long = "admin-password", global = true)]
    pub admin_password: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check the credentials and show the logged-in account
    Login,

    /// Book catalog
    Books {
        #[command(subcommand)]
        cmd: BooksCommand,
    },

    Authors {
        #[command(subcommand)]
        cmd: AuthorsCommand,
    },

    Categories {
        #[command(subcommand)]
        cmd: CategoriesCommand,
    },

    Publishers {
        #[command(subcommand)]
        cmd: PublishersCommand,
    },

    /// Reader accounts
    Users {
        #[command(subcommand)]
        cmd: UsersCommand,
    },
}

#[derive(Args, Debug)]
pub struct PageArgs {
    #[arg(long, default_value_t = 1)]
    pub page: u32,

    /// Page size; defaults to `listing.page_size`
    #[arg(long)]
    pub limit: Option<u32>,
}

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// One or more identifiers
    #[arg(required = true)]
    pub ids: Vec<String>,

    /// Confirm the deletion
    #[arg(long, default_value_t = false)]
    pub yes: bool,
}

#[derive(Subcommand, Debug)]
pub enum BooksCommand {
    List {
        #[command(flatten)]
        page: PageArgs,
        /// Free-text search
        #[arg(long)]
        search: Option<String>,
    },
    Show {
        id: String,
    },
    /// Open the book form, fill it from the flags and submit it
    Create {
        #[command(flatten)]
        fields: BookFields,
    },
    /// Open the book form on an existing book, apply the flags and submit it
    Update {
        id: String,
        #[command(flatten)]
        fields: BookFields,
    },
    Delete(DeleteArgs),
}

/// Book form fields; only the flags given are changed
#[derive(Args, Debug, Default)]
pub struct BookFields {
    #[arg(long)]
    pub title: Option<String>,

    /// Author id; repeat for several authors
    #[arg(long = "author")]
    pub authors: Vec<String>,

    /// Category id; repeat for several categories
    #[arg(long = "category")]
    pub categories: Vec<String>,

    #[arg(long)]
    pub publisher: Option<String>,

    #[arg(long)]
    pub year: Option<i32>,

    #[arg(long)]
    pub isbn: Option<String>,

    #[arg(long)]
    pub quantity: Option<i64>,

    #[arg(long)]
    pub price: Option<f64>,
}

impl BookFields {
    pub fn apply(self, values: &mut BookFormValues) {
        if let Some(title) = self.title {
            values.title = title;
        }
        if !self.authors.is_empty() {
            values.author_ids = self.authors;
        }
        if !self.categories.is_empty() {
            values.category_ids = self.categories;
        }
        if let Some(publisher) = self.publisher {
            values.publisher_id = publisher;
        }
        if let Some(year) = self.year {
            values.year_published = year;
        }
        if let Some(isbn) = self.isbn {
            values.isbn = isbn;
        }
        if let Some(quantity) = self.quantity {
            values.quantity = quantity;
        }
        if let Some(price) = self.price {
            values.price = price;
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum AuthorsCommand {
    List {
        #[command(flatten)]
        page: PageArgs,
        /// Filter by name
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        sort_by: Option<String>,
    },
    Show {
        id: String,
    },
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },
    Delete(DeleteArgs),
}

#[derive(Subcommand, Debug)]
pub enum CategoriesCommand {
    List {
        #[command(flatten)]
        page: PageArgs,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        sort_by: Option<String>,
    },
    Show {
        id: String,
    },
    Create {
        #[arg(long)]
        name: String,
    },
    /// Create several categories in one request
    BulkCreate {
        #[arg(required = true)]
        names: Vec<String>,
    },
    Update {
        id: String,
        #[arg(long)]
        name: String,
    },
    Delete(DeleteArgs),
}

#[derive(Subcommand, Debug)]
pub enum PublishersCommand {
    List {
        #[command(flatten)]
        page: PageArgs,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        sort_by: Option<String>,
    },
    Show {
        id: String,
    },
    Create {
        #[arg(long)]
        name: String,
    },
    Update {
        id: String,
        #[arg(long)]
        name: String,
    },
    Delete(DeleteArgs),
}

#[derive(Subcommand, Debug)]
pub enum UsersCommand {
    List {
        #[command(flatten)]
        page: PageArgs,
        #[arg(long)]
        keyword: Option<String>,
    },
    Show {
        id: String,
    },
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: Option<String>,
        /// `admin` or `user`
        #[arg(long, default_value = "user")]
        role: Role,
        #[arg(long, default_value = "")]
        address: String,
    },
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        password: Option<String>,
        #[arg(long)]
        role: Option<Role>,
        #[arg(long)]
        address: Option<String>,
    },
    Delete(DeleteArgs),
}
