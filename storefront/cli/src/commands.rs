use std::sync::Arc;

use anyhow::{Context, Result};
use medica_client::{
    Config, Role, Storefront,
    models::{
        MedicineQuery, MedicineUpdate, NewCategory, NewMedicine, NewReview, PageQuery,
        ProfileUpdate,
    },
    services::seller::validate_update,
};
use tracing::debug;

use crate::{AdminCommand, CartCommand, Command, OrdersCommand, SellerCommand, render};

/// Runs the page guard; on refusal prints where the storefront would have gone.
fn allowed(storefront: &Storefront, roles: &[Role]) -> bool {
    match storefront.require(roles) {
        Ok(session) => {
            debug!("Acting as {} {}", session.user.role, session.user.id);
            true
        }
        Err(path) => {
            println!("Not available here, redirecting to {path}");
            false
        }
    }
}

fn page(page: Option<u32>, limit: Option<u32>) -> PageQuery {
    PageQuery { page, limit }
}

pub async fn run(command: Command) -> Result<()> {
    let config = Config::load().context("Failed to load configuration")?;
    let storefront = Storefront::create(config).await;

    let outcome = dispatch(&storefront, command).await;
    storefront.dispose();

    outcome
}

async fn dispatch(storefront: &Arc<Storefront>, command: Command) -> Result<()> {
    let services = &storefront.services;

    match command {
        Command::Medicines {
            search,
            page,
            limit,
            sort_by,
            sort_order,
            active,
        } => {
            let query = MedicineQuery {
                search,
                is_active: active.then_some(true),
                page,
                limit,
                sort_by,
                sort_order,
            };
            render::print_page(&services.medicines.list(&query).await?);
        }
        Command::Medicine { id } => render::print_medicine(&services.medicines.by_id(&id).await?),
        Command::Featured => render::print_medicines(&services.medicines.featured().await?),
        Command::Popular => render::print_medicines(&services.medicines.popular().await?),
        Command::Categories { id: Some(id) } => {
            render::print_medicines(&services.categories.medicines(&id).await?)
        }
        Command::Categories { id: None } => {
            render::print_categories(&services.categories.list(PageQuery::default()).await?)
        }
        Command::Cart(command) if allowed(storefront, &[Role::Customer]) => {
            cart(storefront, command).await?
        }
        Command::Checkout { address } if allowed(storefront, &[Role::Customer]) => {
            render::print_summary(&storefront.checkout.summary());
            let placed = storefront.checkout.place_order(&address).await?;
            println!("\nOrder {} placed, see {}", placed.order_id, placed.location);
        }
        Command::Orders(command) if allowed(storefront, &[Role::Customer]) => {
            orders(storefront, command).await?
        }
        Command::Review {
            medicine_id,
            rating,
            comment,
        } if allowed(storefront, &[Role::Customer]) => {
            let review = NewReview {
                medicine_id,
                rating,
                comment,
            };
            let reply = services.reviews.post(&review).await?;
            println!("{}", reply.message_or("Review submitted"));
        }
        Command::Whoami => match storefront.session() {
            Some(session) => render::print_session(&session),
            None => println!("Not signed in"),
        },
        Command::Profile { name, phone }
            if allowed(storefront, &[Role::Customer, Role::Seller, Role::Admin]) =>
        {
            let reply = services
                .auth
                .update_profile(&ProfileUpdate { name, phone })
                .await?;
            println!("{}", reply.message_or("Profile updated"));
        }
        Command::Seller(command) if allowed(storefront, &[Role::Seller]) => {
            seller(storefront, command).await?
        }
        Command::Admin(command) if allowed(storefront, &[Role::Admin]) => {
            admin(storefront, command).await?
        }
        // Guard refused and already said where to go.
        _ => {}
    }

    Ok(())
}

async fn cart(storefront: &Storefront, command: CartCommand) -> Result<()> {
    let store = &storefront.cart;
    let mut notices = store.subscribe();

    let outcome = match command {
        CartCommand::Show => Ok(()),
        CartCommand::Add {
            medicine_id,
            quantity,
        } => store.add_to_cart(&medicine_id, quantity).await,
        CartCommand::Update { id, quantity } => store.update_quantity(&id, quantity).await,
        CartCommand::Remove { id } => store.remove_item(&id).await,
        CartCommand::Clear => store.clear_cart().await,
    };

    render::drain_notices(&mut notices);
    outcome?;

    render::print_cart(&store.items(), &store.summary());

    Ok(())
}

async fn orders(storefront: &Storefront, command: OrdersCommand) -> Result<()> {
    let orders = &storefront.services.orders;

    match command {
        OrdersCommand::List => {
            let (stats, recent) = tokio::try_join!(orders.customer_stats(), orders.recent())?;
            println!(
                "{} orders, {} pending, {} spent\n",
                stats.total_orders,
                stats.pending_orders,
                medica_client::format::format_price(stats.total_spent)
            );
            render::print_recent(&recent);
        }
        OrdersCommand::Show { id } => render::print_order(&orders.by_id(&id).await?),
        OrdersCommand::Cancel { id } => {
            let reply = orders.cancel(&id).await?;
            println!("{}", reply.message_or("Order cancelled"));
        }
    }

    Ok(())
}

async fn seller(storefront: &Storefront, command: SellerCommand) -> Result<()> {
    let services = &storefront.services;

    match command {
        SellerCommand::Stats => {
            println!("{}", serde_json::to_string_pretty(&services.seller.stats().await?)?)
        }
        SellerCommand::Medicines { page: p, limit } => {
            render::print_page(&services.seller.medicines(page(p, limit)).await?)
        }
        SellerCommand::Orders { page: p, limit } => {
            render::print_orders(&services.seller.orders(page(p, limit)).await?.orders)
        }
        SellerCommand::AddMedicine {
            name,
            description,
            price,
            stocks,
            manufacturer,
            category_id,
            thumbnail,
        } => {
            let medicine = NewMedicine {
                name,
                description,
                price,
                stocks,
                manufacturer,
                category_id,
                thumbnail,
            };
            let reply = services.medicines.create(&medicine).await?;
            println!("{}", reply.message_or("Medicine added"));
        }
        SellerCommand::UpdateMedicine {
            id,
            name,
            description,
            price,
            stocks,
            manufacturer,
            featured,
            inactive,
        } => {
            let update = MedicineUpdate {
                name,
                description,
                price,
                stocks,
                manufacturer,
                is_featured: featured,
                is_active: !inactive,
            };
            validate_update(&update)?;

            let reply = services.seller.update_medicine(&id, &update).await?;
            println!("{}", reply.message_or("Medicine updated"));
        }
        SellerCommand::DeleteMedicine { id } => {
            let reply = services.seller.delete_medicine(&id).await?;
            println!("{}", reply.message_or("Medicine deleted"));
        }
        SellerCommand::UpdateStatus { order_id, status } => {
            let reply = services
                .seller
                .update_order_status(&order_id, status)
                .await?;
            println!("{}", reply.message_or(&format!("Order marked {}", status.label())));
        }
    }

    Ok(())
}

async fn admin(storefront: &Storefront, command: AdminCommand) -> Result<()> {
    let services = &storefront.services;

    match command {
        AdminCommand::Stats => {
            println!("{}", serde_json::to_string_pretty(&services.admin.stats().await?)?)
        }
        AdminCommand::Users => render::print_users(&services.admin.users().await?),
        AdminCommand::SetStatus { user_id } => {
            let users = services.admin.users().await?;
            let user = users
                .iter()
                .find(|user| user.id == user_id)
                .with_context(|| format!("No user with id {user_id}"))?;

            let status = user.status.toggled();
            let reply = services
                .admin
                .update_user_status(&user_id, status)
                .await?;
            println!("{}", reply.message_or(&format!("{} is now {status}", user.name)));
        }
        AdminCommand::DeleteUser { user_id } => {
            let reply = services.admin.delete_user(&user_id).await?;
            println!("{}", reply.message_or("User deleted"));
        }
        AdminCommand::AddCategory { name, description } => {
            let reply = services
                .categories
                .create(&NewCategory { name, description })
                .await?;
            println!("{}", reply.message_or("Category created"));
        }
    }

    Ok(())
}
