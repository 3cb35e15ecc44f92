//! Line-oriented front end.
//!
//! The shell is the UI event loop: it owns the cart and the active view, and
//! processes one command at a time, in the order typed. The only concurrent
//! piece is the catalog fetch, which re-renders the catalog when it lands.

use std::io::{self, Write};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use storefront_cart::CartStore;
use storefront_catalog::CatalogClient;
use storefront_core::{DomainError, ProductId};

use crate::effects::AddToCartEffect;
use crate::render;
use crate::routes::Route;
use crate::views::{CartView, CatalogView};

const HELP: &str = "\
commands:
  products | ls | home | back   show the catalog
  cart                          show the cart
  go <path>                     navigate to / or /cart
  add <id>                      add a product to the cart (catalog)
  remove <id> | rm <id>         remove a line from the cart (cart)
  show                          render the current view again
  checkout                      proceed to checkout
  help                          this text
  quit | exit                   leave";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Go(Route),
    Add(ProductId),
    Remove(ProductId),
    Show,
    Checkout,
    Help,
    Quit,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command {0:?} (try `help`)")]
    Unknown(String),
    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),
    #[error("`{0}` takes at most one argument")]
    TooManyArguments(&'static str),
    #[error("no route for path {0:?}")]
    UnknownRoute(String),
    #[error(transparent)]
    InvalidId(#[from] DomainError),
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(verb) = words.next() else {
            return Err(CommandError::Empty);
        };
        let arg = words.next();
        let extra = words.next().is_some();

        let verb = verb.to_ascii_lowercase();
        let (name, command) = match verb.as_str() {
            "products" | "ls" | "home" | "back" => {
                ("products", no_arg(arg, Command::Go(Route::Catalog)))
            }
            "cart" => ("cart", no_arg(arg, Command::Go(Route::Cart))),
            "show" => ("show", no_arg(arg, Command::Show)),
            "checkout" => ("checkout", no_arg(arg, Command::Checkout)),
            "help" | "?" => ("help", no_arg(arg, Command::Help)),
            "quit" | "exit" => ("quit", no_arg(arg, Command::Quit)),
            "go" => {
                let path = arg.ok_or(CommandError::MissingArgument("go"))?;
                let route = Route::from_path(path)
                    .ok_or_else(|| CommandError::UnknownRoute(path.to_string()))?;
                ("go", Some(Command::Go(route)))
            }
            "add" => {
                let id = arg.ok_or(CommandError::MissingArgument("add"))?;
                ("add", Some(Command::Add(id.parse()?)))
            }
            "remove" | "rm" => {
                let id = arg.ok_or(CommandError::MissingArgument("remove"))?;
                ("remove", Some(Command::Remove(id.parse()?)))
            }
            _ => return Err(CommandError::Unknown(verb.clone())),
        };

        match command {
            Some(command) if !extra => Ok(command),
            _ => Err(CommandError::TooManyArguments(name)),
        }
    }
}

fn no_arg(arg: Option<&str>, command: Command) -> Option<Command> {
    arg.is_none().then_some(command)
}

/// Whether the loop should keep going after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

enum ActiveView {
    Catalog(CatalogView),
    Cart(CartView),
}

pub struct Shell {
    cart: CartStore,
    view: ActiveView,
    client: Arc<dyn CatalogClient>,
    fetch_delay: Duration,
    effect: Arc<dyn AddToCartEffect>,
}

impl Shell {
    /// Start a session on the catalog route. Must be called from within a
    /// tokio runtime.
    pub fn new(
        client: Arc<dyn CatalogClient>,
        fetch_delay: Duration,
        effect: Arc<dyn AddToCartEffect>,
    ) -> Self {
        let mut cart = CartStore::new();
        let catalog = CatalogView::mount(client.clone(), fetch_delay, &mut cart, effect.clone());

        Self {
            cart,
            view: ActiveView::Catalog(catalog),
            client,
            fetch_delay,
            effect,
        }
    }

    pub fn route(&self) -> Route {
        match self.view {
            ActiveView::Catalog(_) => Route::Catalog,
            ActiveView::Cart(_) => Route::Cart,
        }
    }

    pub fn cart(&self) -> &CartStore {
        &self.cart
    }

    /// The catalog view, when it is the active one.
    pub fn catalog(&self) -> Option<&CatalogView> {
        match &self.view {
            ActiveView::Catalog(view) => Some(view),
            ActiveView::Cart(_) => None,
        }
    }

    fn catalog_pending(&self) -> bool {
        self.catalog().is_some_and(CatalogView::is_pending)
    }

    /// Wait for the active catalog view to finish loading. Returns at once on
    /// the cart route.
    pub async fn wait_for_catalog(&mut self) {
        if let ActiveView::Catalog(view) = &mut self.view {
            view.wait_until_loaded().await;
        }
    }

    /// Switch routes. Leaving a route tears its view down; entering the
    /// catalog mounts a fresh view, which fetches again.
    pub fn navigate(&mut self, route: Route) {
        if self.route() == route {
            return;
        }

        self.view = match route {
            Route::Catalog => ActiveView::Catalog(CatalogView::mount(
                self.client.clone(),
                self.fetch_delay,
                &mut self.cart,
                self.effect.clone(),
            )),
            Route::Cart => ActiveView::Cart(CartView::mount(&mut self.cart)),
        };

        tracing::info!(route = %route, "navigated");
    }

    pub fn render(&self, out: &mut dyn Write) -> io::Result<()> {
        match &self.view {
            ActiveView::Catalog(view) => render::catalog(view, out),
            ActiveView::Cart(view) => render::cart(&view.page(), out),
        }
    }

    /// Process one input line.
    pub fn handle_line(&mut self, line: &str, out: &mut dyn Write) -> io::Result<Flow> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(Flow::Continue);
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                writeln!(out, "error: {err}")?;
                return Ok(Flow::Continue);
            }
        };

        match command {
            Command::Quit => return Ok(Flow::Quit),
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Show => self.render(out)?,
            Command::Go(route) => {
                self.navigate(route);
                self.render(out)?;
            }
            Command::Add(id) => match &self.view {
                ActiveView::Catalog(view) => match view.add_to_cart(&mut self.cart, id, out) {
                    Ok(quantity) => writeln!(out, "added {id} (quantity {quantity})")?,
                    Err(err) => writeln!(out, "error: {err}")?,
                },
                ActiveView::Cart(_) => {
                    writeln!(out, "error: products are added from the catalog (try `back`)")?
                }
            },
            Command::Remove(id) => match &self.view {
                ActiveView::Cart(view) => {
                    view.remove(&mut self.cart, id);
                    self.render(out)?;
                }
                ActiveView::Catalog(_) => {
                    writeln!(out, "error: items are removed from the cart (try `cart`)")?
                }
            },
            Command::Checkout => {}
        }

        Ok(Flow::Continue)
    }

    /// Drive the session from `input` until it ends or `quit` is entered.
    pub async fn run<R>(&mut self, input: R, out: &mut dyn Write) -> anyhow::Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut lines = input.lines();

        self.render(out)?;
        prompt(out)?;

        loop {
            tokio::select! {
                _ = self.wait_for_catalog(), if self.catalog_pending() => {
                    if self.catalog().is_some() {
                        writeln!(out)?;
                        self.render(out)?;
                        prompt(out)?;
                    }
                }
                line = lines.next_line() => {
                    let Some(line) = line.context("failed to read input")? else {
                        break;
                    };
                    if self.handle_line(&line, out)? == Flow::Quit {
                        break;
                    }
                    prompt(out)?;
                }
            }
        }

        Ok(())
    }
}

fn prompt(out: &mut dyn Write) -> io::Result<()> {
    write!(out, "> ")?;
    out.flush()
}
