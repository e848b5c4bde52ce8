//! Plain-terminal table output for the list subcommands

use colored::*;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};

use pawdeck_core::{FeaturedListing, PricingPlan, StatusTone, UserRecord};

/// Status text colored by its tone; unknown statuses stay uncolored
pub fn colored_status(status: &str) -> ColoredString {
    match StatusTone::classify(status) {
        StatusTone::Positive => status.green(),
        StatusTone::Muted => status.dimmed(),
        StatusTone::Negative => status.red(),
        StatusTone::Pending => status.yellow(),
        StatusTone::Neutral => status.normal(),
    }
}

fn base_table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(headers.iter().map(|h| Cell::new(h)).collect::<Vec<_>>());
    table
}

pub fn print_users(users: &[UserRecord]) {
    if users.is_empty() {
        println!("{}", "No records found".dimmed());
        return;
    }
    let mut table = base_table(&["ID", "Name", "Email", "Phone", "Role", "Status"]);
    for user in users {
        table.add_row(vec![
            user.id.to_string(),
            user.display_name(),
            user.email.clone(),
            user.phone_number.clone(),
            user.role.clone(),
            colored_status(&user.status).to_string(),
        ]);
    }
    println!("{table}");
    println!("{} record(s)", users.len());
}

pub fn print_listings(listings: &[FeaturedListing], page: u32, last_page: u32, total: u64) {
    if listings.is_empty() {
        println!("{}", "No records found".dimmed());
        return;
    }
    let mut table = base_table(&["ID", "Pet Name", "Type", "Price", "Owner", "Status"]);
    for listing in listings {
        table.add_row(vec![
            listing.id.to_string(),
            listing.pet_name.clone(),
            listing.pet_type.clone(),
            listing.price.clone(),
            listing.user.display_name(),
            colored_status(&listing.status).to_string(),
        ]);
    }
    println!("{table}");
    println!("Page {}/{} - {} record(s) total", page, last_page, total);
}

pub fn print_pricing(plans: &[PricingPlan], page: u32, last_page: u32, total: u64) {
    if plans.is_empty() {
        println!("{}", "No records found".dimmed());
        return;
    }
    let mut table = base_table(&["ID", "Period (months)", "Monthly", "Discount %", "Total"]);
    for plan in plans {
        table.add_row(vec![
            plan.id.to_string(),
            plan.period_time.clone(),
            plan.monthly_payment.clone(),
            plan.discount.clone(),
            plan.total_payment.clone(),
        ]);
    }
    println!("{table}");
    println!("Page {}/{} - {} record(s) total", page, last_page, total);
}
