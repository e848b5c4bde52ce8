//! Screen catalog: one entry per collection the console manages
//!
//! The people screens are all the same remote `/user` collection
//! filtered by role. General listings, payments, feeds, pairs, feed
//! requests and promotion banners have no endpoint and run against
//! seeded in-memory data.

use pawdeck_client::ListingFilters;
use pawdeck_core::{
    Feed, FeedRequest, FeaturedListing, Listing, Pair, PaymentTransaction, PricingPlan,
    PromotionBanner, Role, UserRecord,
};
use pawdeck_store::Collection;
use ratatui::layout::Constraint;

use crate::ui::widgets::form::{FieldKind, FormField, FormState};
use crate::ui::widgets::table::{Column, TableRow};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    Users,
    Vendors,
    Breeders,
    Veterinary,
    GeneralListings,
    Listings,
    Pricing,
    Payments,
    Feeds,
    Pairs,
    FeedRequests,
    Promotions,
}

const PEOPLE_COLUMNS: &[Column] = &[
    Column::new("ID", Constraint::Length(6)),
    Column::new("Name", Constraint::Percentage(25)),
    Column::new("Email", Constraint::Percentage(30)),
    Column::new("Phone", Constraint::Percentage(20)),
    Column::new("Status", Constraint::Percentage(15)),
];

const GENERAL_LISTING_COLUMNS: &[Column] = &[
    Column::new("ID", Constraint::Length(6)),
    Column::new("Listing Name", Constraint::Percentage(28)),
    Column::new("Type", Constraint::Percentage(18)),
    Column::new("Owner", Constraint::Percentage(22)),
    Column::new("Status", Constraint::Percentage(16)),
];

const FEATURED_LISTING_COLUMNS: &[Column] = &[
    Column::new("ID", Constraint::Length(6)),
    Column::new("Pet Name", Constraint::Percentage(20)),
    Column::new("Type", Constraint::Percentage(15)),
    Column::new("Price", Constraint::Percentage(10)),
    Column::new("Owner", Constraint::Percentage(25)),
    Column::new("Status", Constraint::Percentage(15)),
];

const PRICING_COLUMNS: &[Column] = &[
    Column::new("ID", Constraint::Length(6)),
    Column::new("Period (months)", Constraint::Percentage(20)),
    Column::new("Monthly", Constraint::Percentage(20)),
    Column::new("Discount %", Constraint::Percentage(20)),
    Column::new("Total", Constraint::Percentage(20)),
];

const PAYMENT_COLUMNS: &[Column] = &[
    Column::new("ID", Constraint::Length(6)),
    Column::new("Name", Constraint::Percentage(18)),
    Column::new("Email", Constraint::Percentage(24)),
    Column::new("Method", Constraint::Percentage(14)),
    Column::new("Price", Constraint::Percentage(10)),
    Column::new("Date", Constraint::Percentage(16)),
    Column::new("Status", Constraint::Percentage(12)),
];

const FEED_COLUMNS: &[Column] = &[
    Column::new("ID", Constraint::Length(6)),
    Column::new("Name", Constraint::Percentage(22)),
    Column::new("Email", Constraint::Percentage(28)),
    Column::new("Date", Constraint::Percentage(16)),
    Column::new("Type", Constraint::Percentage(14)),
    Column::new("Status", Constraint::Percentage(14)),
];

const PAIR_COLUMNS: &[Column] = &[
    Column::new("ID", Constraint::Length(6)),
    Column::new("Pairs Name", Constraint::Percentage(24)),
    Column::new("Owner", Constraint::Percentage(24)),
    Column::new("Date", Constraint::Percentage(16)),
    Column::new("Type", Constraint::Percentage(14)),
    Column::new("Status", Constraint::Percentage(14)),
];

const FEED_REQUEST_COLUMNS: &[Column] = &[
    Column::new("ID", Constraint::Length(6)),
    Column::new("User", Constraint::Percentage(20)),
    Column::new("Email", Constraint::Percentage(26)),
    Column::new("Subject", Constraint::Percentage(24)),
    Column::new("Received", Constraint::Percentage(14)),
    Column::new("Status", Constraint::Percentage(12)),
];

const PROMOTION_COLUMNS: &[Column] = &[
    Column::new("ID", Constraint::Length(6)),
    Column::new("Title", Constraint::Percentage(30)),
    Column::new("Link", Constraint::Percentage(26)),
    Column::new("Description", Constraint::Percentage(26)),
    Column::new("Active", Constraint::Percentage(12)),
];

impl Screen {
    pub const ALL: [Screen; 12] = [
        Screen::Users,
        Screen::Vendors,
        Screen::Breeders,
        Screen::Veterinary,
        Screen::GeneralListings,
        Screen::Listings,
        Screen::Pricing,
        Screen::Payments,
        Screen::Feeds,
        Screen::Pairs,
        Screen::FeedRequests,
        Screen::Promotions,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Screen::Users => "Users",
            Screen::Vendors => "Vendors",
            Screen::Breeders => "Breeders",
            Screen::Veterinary => "Veterinary",
            Screen::GeneralListings => "Listings",
            Screen::Listings => "Featured Listings",
            Screen::Pricing => "Pricing Plans",
            Screen::Payments => "Payments",
            Screen::Feeds => "Feeds",
            Screen::Pairs => "Pairs",
            Screen::FeedRequests => "Feed Requests",
            Screen::Promotions => "Promotion Banners",
        }
    }

    pub fn next(&self) -> Screen {
        let index = Screen::ALL.iter().position(|s| s == self).unwrap_or(0);
        Screen::ALL[(index + 1) % Screen::ALL.len()]
    }

    pub fn prev(&self) -> Screen {
        let index = Screen::ALL.iter().position(|s| s == self).unwrap_or(0);
        Screen::ALL[(index + Screen::ALL.len() - 1) % Screen::ALL.len()]
    }

    /// Role filter for the people screens
    pub fn role(&self) -> Option<Role> {
        match self {
            Screen::Users => Some(Role::User),
            Screen::Vendors => Some(Role::Vendor),
            Screen::Breeders => Some(Role::Breeder),
            Screen::Veterinary => Some(Role::Veterinary),
            _ => None,
        }
    }

    /// Cache tag of the remote collection behind this screen
    pub fn collection(&self) -> Option<Collection> {
        match self {
            Screen::Users | Screen::Vendors | Screen::Breeders | Screen::Veterinary => {
                Some(Collection::Users)
            }
            Screen::Listings => Some(Collection::Listings),
            Screen::Pricing => Some(Collection::PricingPlans),
            _ => None,
        }
    }

    pub fn is_mock(&self) -> bool {
        self.collection().is_none()
    }

    pub fn columns(&self) -> &'static [Column] {
        match self {
            Screen::Users | Screen::Vendors | Screen::Breeders | Screen::Veterinary => {
                PEOPLE_COLUMNS
            }
            Screen::GeneralListings => GENERAL_LISTING_COLUMNS,
            Screen::Listings => FEATURED_LISTING_COLUMNS,
            Screen::Pricing => PRICING_COLUMNS,
            Screen::Payments => PAYMENT_COLUMNS,
            Screen::Feeds => FEED_COLUMNS,
            Screen::Pairs => PAIR_COLUMNS,
            Screen::FeedRequests => FEED_REQUEST_COLUMNS,
            Screen::Promotions => PROMOTION_COLUMNS,
        }
    }

    /// Which column gets status-tone coloring
    pub fn status_column(&self) -> Option<usize> {
        match self {
            Screen::Pricing => None,
            Screen::Payments => Some(6),
            _ => Some(self.columns().len() - 1),
        }
    }

    /// Whether the screen offers a create action. Listings are created
    /// by marketplace users; the console only edits and removes them.
    pub fn can_create(&self) -> bool {
        !matches!(self, Screen::Listings)
    }

    pub fn has_filter(&self) -> bool {
        matches!(self, Screen::Listings)
    }
}

// --- table rows ---

pub fn user_row(user: &UserRecord) -> TableRow {
    TableRow {
        id: user.id.to_string(),
        cells: vec![
            user.id.to_string(),
            user.display_name(),
            user.email.clone(),
            user.phone_number.clone(),
            user.status.clone(),
        ],
    }
}

pub fn listing_row(listing: &FeaturedListing) -> TableRow {
    TableRow {
        id: listing.id.to_string(),
        cells: vec![
            listing.id.to_string(),
            listing.pet_name.clone(),
            listing.pet_type.clone(),
            listing.price.clone(),
            listing.user.display_name(),
            listing.status.clone(),
        ],
    }
}

pub fn pricing_row(plan: &PricingPlan) -> TableRow {
    TableRow {
        id: plan.id.to_string(),
        cells: vec![
            plan.id.to_string(),
            plan.period_time.clone(),
            plan.monthly_payment.clone(),
            plan.discount.clone(),
            plan.total_payment.clone(),
        ],
    }
}

pub fn general_listing_row(listing: &Listing) -> TableRow {
    TableRow {
        id: listing.id.clone(),
        cells: vec![
            listing.id.clone(),
            listing.name.clone(),
            listing.listing_type.clone(),
            listing.owner.clone(),
            listing.status.clone(),
        ],
    }
}

pub fn promotion_row(banner: &PromotionBanner) -> TableRow {
    TableRow {
        id: banner.id.clone(),
        cells: vec![
            banner.id.clone(),
            banner.title.clone(),
            banner.link.clone(),
            banner.description.clone(),
            if banner.is_active { "Active" } else { "Inactive" }.to_string(),
        ],
    }
}

pub fn payment_row(payment: &PaymentTransaction) -> TableRow {
    TableRow {
        id: payment.id.clone(),
        cells: vec![
            payment.id.clone(),
            payment.name.clone(),
            payment.email.clone(),
            payment.method.clone(),
            payment.price.clone(),
            payment.date.clone(),
            payment.status.clone(),
        ],
    }
}

pub fn feed_row(feed: &Feed) -> TableRow {
    TableRow {
        id: feed.id.clone(),
        cells: vec![
            feed.id.clone(),
            feed.name.clone(),
            feed.email.clone(),
            feed.date.clone(),
            feed.feed_type.clone(),
            feed.status.clone(),
        ],
    }
}

pub fn pair_row(pair: &Pair) -> TableRow {
    TableRow {
        id: pair.id.clone(),
        cells: vec![
            pair.id.clone(),
            pair.pairs_name.clone(),
            pair.owner.clone(),
            pair.date.clone(),
            pair.pair_type.clone(),
            pair.status.clone(),
        ],
    }
}

pub fn feed_request_row(request: &FeedRequest) -> TableRow {
    TableRow {
        id: request.id.clone(),
        cells: vec![
            request.id.clone(),
            request.user_name.clone(),
            request.email.clone(),
            request.subject.clone(),
            request.received.clone(),
            request.status.clone(),
        ],
    }
}

// --- modal forms ---

fn role_options() -> Vec<String> {
    Role::ALL.iter().map(|role| role.as_str().to_string()).collect()
}

/// Create form for a people screen. The role is pre-selected from the
/// screen but stays editable.
pub fn user_create_form(role: Role) -> FormState {
    FormState::new("New User")
        .field(FormField::text("firstName", "First Name", "").required())
        .field(FormField::text("lastName", "Last Name", "").required())
        .field(FormField::text("email", "Email", "").kind(FieldKind::Email).required())
        .field(FormField::text("phoneNumber", "Phone Number", "").required())
        .field(
            FormField::text("password", "Password", "")
                .kind(FieldKind::Password)
                .required(),
        )
        .field(FormField::select("role", "Role", role_options(), role.as_str()))
}

pub fn user_edit_form(user: &UserRecord) -> FormState {
    FormState::for_edit(format!("Edit User #{}", user.id))
        .field(FormField::text("firstName", "First Name", &user.first_name).required())
        .field(FormField::text("lastName", "Last Name", &user.last_name).required())
        .field(
            FormField::text("email", "Email", &user.email)
                .kind(FieldKind::Email)
                .required(),
        )
        .field(FormField::text("phoneNumber", "Phone Number", &user.phone_number).required())
        .field(FormField::select("role", "Role", role_options(), &user.role))
        .field(FormField::text("status", "Status", &user.status))
}

pub fn listing_edit_form(listing: &FeaturedListing) -> FormState {
    FormState::for_edit(format!("Edit Listing #{}", listing.id))
        .field(FormField::text("petName", "Pet Name", &listing.pet_name).required())
        .field(FormField::text("type", "Type", &listing.pet_type).required())
        .field(
            FormField::text("price", "Price", &listing.price)
                .kind(FieldKind::Number)
                .required(),
        )
        .field(FormField::text(
            "description",
            "Description",
            listing.description.as_deref().unwrap_or(""),
        ))
        .field(FormField::text("status", "Status", &listing.status))
        .field(FormField::text("image", "Image (file path)", "").kind(FieldKind::Image))
}

pub fn pricing_create_form() -> FormState {
    FormState::new("New Pricing Plan")
        .field(
            FormField::text("periodTime", "Period (months)", "")
                .kind(FieldKind::Number)
                .required(),
        )
        .field(
            FormField::text("monthlyPayment", "Monthly Payment", "")
                .kind(FieldKind::Number)
                .required(),
        )
        .field(
            FormField::text("discount", "Discount %", "0")
                .kind(FieldKind::Number)
                .required(),
        )
        .field(
            FormField::text("totalPayment", "Total Payment", "")
                .kind(FieldKind::Number)
                .required(),
        )
}

pub fn pricing_edit_form(plan: &PricingPlan) -> FormState {
    FormState::for_edit(format!("Edit Pricing Plan #{}", plan.id))
        .field(
            FormField::text("periodTime", "Period (months)", &plan.period_time)
                .kind(FieldKind::Number)
                .required(),
        )
        .field(
            FormField::text("monthlyPayment", "Monthly Payment", &plan.monthly_payment)
                .kind(FieldKind::Number)
                .required(),
        )
        .field(
            FormField::text("discount", "Discount %", &plan.discount)
                .kind(FieldKind::Number)
                .required(),
        )
        .field(
            FormField::text("totalPayment", "Total Payment", &plan.total_payment)
                .kind(FieldKind::Number)
                .required(),
        )
}

/// Filter overlay for the listings screen. Blank fields are dropped
/// when the filter is applied; a blank language falls back to "ur".
pub fn listing_filter_form(current: &ListingFilters) -> FormState {
    let number = |value: &Option<f64>| value.map(|v| v.to_string()).unwrap_or_default();
    FormState::new("Filter Listings")
        .submit_label("apply")
        .field(FormField::text(
            "petName",
            "Pet Name",
            current.pet_name.as_deref().unwrap_or(""),
        ))
        .field(FormField::text(
            "type",
            "Type",
            current.pet_type.as_deref().unwrap_or(""),
        ))
        .field(FormField::text(
            "userId",
            "Owner ID",
            &current.user_id.map(|id| id.to_string()).unwrap_or_default(),
        ).kind(FieldKind::Number))
        .field(
            FormField::text("minPrice", "Min Price", &number(&current.min_price))
                .kind(FieldKind::Number),
        )
        .field(
            FormField::text("maxPrice", "Max Price", &number(&current.max_price))
                .kind(FieldKind::Number),
        )
        .field(FormField::select(
            "role",
            "Owner Role",
            std::iter::once(String::new()).chain(role_options()).collect(),
            current.role.map(|r| r.as_str()).unwrap_or(""),
        ))
        .field(FormField::text(
            "lang",
            "Language",
            current.lang.as_deref().unwrap_or(""),
        ))
}

fn mock_form(
    title: String,
    is_edit: bool,
    fields: Vec<FormField>,
) -> FormState {
    let mut form = if is_edit {
        FormState::for_edit(title)
    } else {
        FormState::new(title)
    };
    for field in fields {
        form = form.field(field);
    }
    form
}

pub fn general_listing_form(existing: Option<&Listing>) -> FormState {
    let current = existing.cloned().unwrap_or(Listing {
        id: String::new(),
        name: String::new(),
        listing_type: "Veterinary".to_string(),
        owner: String::new(),
        status: "Active".to_string(),
        is_featured: false,
    });
    let title = match existing {
        Some(listing) => format!("Edit Listing #{}", listing.id),
        None => "New Listing".to_string(),
    };
    mock_form(
        title,
        existing.is_some(),
        vec![
            FormField::text("name", "Listing Name", &current.name).required(),
            FormField::select(
                "type",
                "Type",
                vec![
                    "Veterinary".to_string(),
                    "Breeder".to_string(),
                    "Vendor".to_string(),
                ],
                &current.listing_type,
            ),
            FormField::text("owner", "Owner", &current.owner).required(),
            FormField::select(
                "status",
                "Status",
                vec![
                    "Active".to_string(),
                    "Expired".to_string(),
                    "Paused".to_string(),
                ],
                &current.status,
            ),
        ],
    )
}

pub fn promotion_form(existing: Option<&PromotionBanner>) -> FormState {
    let current = existing.cloned().unwrap_or(PromotionBanner {
        id: String::new(),
        title: String::new(),
        link: String::new(),
        description: String::new(),
        image_url: String::new(),
        is_active: true,
    });
    let title = match existing {
        Some(banner) => format!("Edit Promotion Banner #{}", banner.id),
        None => "New Promotion Banner".to_string(),
    };
    let mut image = FormField::text("image", "Image (file path)", "").kind(FieldKind::Image);
    // A new banner needs an image; an edit keeps the current one when blank
    if existing.is_none() {
        image = image.required();
    }
    mock_form(
        title,
        existing.is_some(),
        vec![
            FormField::text("title", "Banner Title", &current.title).required(),
            FormField::text("link", "Link", &current.link).required(),
            FormField::text("description", "Description", &current.description).required(),
            image,
        ],
    )
}

pub fn payment_form(existing: Option<&PaymentTransaction>) -> FormState {
    let blank = || PaymentTransaction {
        id: String::new(),
        name: String::new(),
        email: String::new(),
        method: "Stripe".to_string(),
        price: String::new(),
        date: String::new(),
        status: "Pending".to_string(),
    };
    let current = existing.cloned().unwrap_or_else(blank);
    let title = match existing {
        Some(payment) => format!("Edit Payment #{}", payment.id),
        None => "New Payment".to_string(),
    };
    mock_form(
        title,
        existing.is_some(),
        vec![
            FormField::text("name", "Name", &current.name).required(),
            FormField::text("email", "Email", &current.email)
                .kind(FieldKind::Email)
                .required(),
            FormField::select(
                "method",
                "Method",
                vec!["Stripe".to_string(), "PayPal".to_string(), "Bank".to_string()],
                &current.method,
            ),
            FormField::text("price", "Price", &current.price).required(),
            FormField::text("date", "Date", &current.date).required(),
            FormField::text("status", "Status", &current.status),
        ],
    )
}

pub fn feed_form(existing: Option<&Feed>) -> FormState {
    let current = existing.cloned().unwrap_or(Feed {
        id: String::new(),
        name: String::new(),
        email: String::new(),
        date: String::new(),
        feed_type: String::new(),
        status: "New".to_string(),
    });
    let title = match existing {
        Some(feed) => format!("Edit Feed #{}", feed.id),
        None => "New Feed".to_string(),
    };
    mock_form(
        title,
        existing.is_some(),
        vec![
            FormField::text("name", "Name", &current.name).required(),
            FormField::text("email", "Email", &current.email)
                .kind(FieldKind::Email)
                .required(),
            FormField::text("date", "Date", &current.date).required(),
            FormField::text("type", "Type", &current.feed_type).required(),
            FormField::text("status", "Status", &current.status),
        ],
    )
}

pub fn pair_form(existing: Option<&Pair>) -> FormState {
    let current = existing.cloned().unwrap_or(Pair {
        id: String::new(),
        image: None,
        pairs_name: String::new(),
        owner: String::new(),
        date: String::new(),
        pair_type: String::new(),
        status: "Open".to_string(),
    });
    let title = match existing {
        Some(pair) => format!("Edit Pair #{}", pair.id),
        None => "New Pair".to_string(),
    };
    mock_form(
        title,
        existing.is_some(),
        vec![
            FormField::text("pairsName", "Pairs Name", &current.pairs_name).required(),
            FormField::text("owner", "Owner", &current.owner).required(),
            FormField::text("date", "Date", &current.date).required(),
            FormField::text("type", "Type", &current.pair_type).required(),
            FormField::text("status", "Status", &current.status),
            FormField::text("image", "Image (file path)", "").kind(FieldKind::Image),
        ],
    )
}

pub fn feed_request_form(existing: Option<&FeedRequest>) -> FormState {
    let current = existing.cloned().unwrap_or(FeedRequest {
        id: String::new(),
        user_name: String::new(),
        email: String::new(),
        subject: String::new(),
        received: String::new(),
        status: "Open".to_string(),
    });
    let title = match existing {
        Some(request) => format!("Edit Feed Request #{}", request.id),
        None => "New Feed Request".to_string(),
    };
    mock_form(
        title,
        existing.is_some(),
        vec![
            FormField::text("userName", "User Name", &current.user_name).required(),
            FormField::text("email", "Email", &current.email)
                .kind(FieldKind::Email)
                .required(),
            FormField::text("subject", "Subject", &current.subject).required(),
            FormField::text("received", "Received", &current.received).required(),
            FormField::text("status", "Status", &current.status),
        ],
    )
}

// --- fixtures for the mock-only screens ---

pub fn seed_general_listings() -> Vec<Listing> {
    let listing = |id: &str, name: &str, listing_type: &str, owner: &str, status: &str, featured| {
        Listing {
            id: id.to_string(),
            name: name.to_string(),
            listing_type: listing_type.to_string(),
            owner: owner.to_string(),
            status: status.to_string(),
            is_featured: featured,
        }
    };
    vec![
        listing("001", "Happy Paws", "Veterinary", "John", "Active", true),
        listing("002", "Puppy World", "Breeder", "Amy", "Expired", false),
        listing("003", "Friendly Tails", "Vendor", "Mike", "Paused", false),
    ]
}

pub fn seed_promotions() -> Vec<PromotionBanner> {
    vec![
        PromotionBanner {
            id: "1".to_string(),
            title: "Spring Sale - 30% OFF Pet Supplies!".to_string(),
            link: "https://pawdeck.example/promos/spring".to_string(),
            description: "Get the best deals on pet food, toys, and accessories this spring season."
                .to_string(),
            image_url: "https://pawdeck.example/banners/spring.jpg".to_string(),
            is_active: true,
        },
        PromotionBanner {
            id: "2".to_string(),
            title: "New Arrival: Organic Dog Food".to_string(),
            link: "https://pawdeck.example/promos/organic".to_string(),
            description: "Healthy and nutritious organic food for your furry friends. Now available in store!"
                .to_string(),
            image_url: "https://pawdeck.example/banners/organic.jpg".to_string(),
            is_active: false,
        },
    ]
}

pub fn seed_payments() -> Vec<PaymentTransaction> {
    let payment = |id: &str, name: &str, method: &str, price: &str, date: &str, status: &str| {
        PaymentTransaction {
            id: id.to_string(),
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
            method: method.to_string(),
            price: price.to_string(),
            date: date.to_string(),
            status: status.to_string(),
        }
    };
    vec![
        payment("01", "Amara Khan", "Stripe", "$49", "02 Jan 2025", "Paid"),
        payment("02", "Bilal Ahmed", "PayPal", "$120", "15 Jan 2025", "Pending"),
        payment("03", "Clara Diaz", "Stripe", "$75", "28 Jan 2025", "Not Pay"),
        payment("04", "Daniyal Raza", "Bank", "$200", "03 Feb 2025", "Paid"),
        payment("05", "Eva Moretti", "Stripe", "$35", "19 Feb 2025", "Overdue"),
    ]
}

pub fn seed_feeds() -> Vec<Feed> {
    let feed = |id: &str, name: &str, date: &str, feed_type: &str, status: &str| Feed {
        id: id.to_string(),
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
        date: date.to_string(),
        feed_type: feed_type.to_string(),
        status: status.to_string(),
    };
    vec![
        feed("01", "Farah Malik", "05 Jan 2025", "Article", "Active"),
        feed("02", "Gustav Lind", "12 Jan 2025", "Video", "Pending"),
        feed("03", "Hina Qureshi", "22 Jan 2025", "Article", "Offline"),
        feed("04", "Ivan Petrov", "30 Jan 2025", "Photo", "Active"),
    ]
}

pub fn seed_pairs() -> Vec<Pair> {
    let pair = |id: &str, name: &str, owner: &str, date: &str, pair_type: &str, status: &str| Pair {
        id: id.to_string(),
        image: None,
        pairs_name: name.to_string(),
        owner: owner.to_string(),
        date: date.to_string(),
        pair_type: pair_type.to_string(),
        status: status.to_string(),
    };
    vec![
        pair("01", "Luna & Max", "Amara Khan", "08 Jan 2025", "Dog", "Open"),
        pair("02", "Coco & Bella", "Bilal Ahmed", "17 Jan 2025", "Cat", "Close"),
        pair("03", "Kiwi & Mango", "Clara Diaz", "25 Jan 2025", "Parrot", "In Progress"),
    ]
}

pub fn seed_feed_requests() -> Vec<FeedRequest> {
    let request = |id: &str, user: &str, subject: &str, received: &str, status: &str| FeedRequest {
        id: id.to_string(),
        user_name: user.to_string(),
        email: format!("{}@example.com", user.to_lowercase().replace(' ', ".")),
        subject: subject.to_string(),
        received: received.to_string(),
        status: status.to_string(),
    };
    vec![
        request("01", "Jamal Noor", "Puppy diet plan", "04 Jan 2025", "Open"),
        request("02", "Katrin Vos", "Vaccination schedule", "11 Jan 2025", "In Progress"),
        request("03", "Leila Saab", "Grooming for long fur", "21 Jan 2025", "Closed"),
        request("04", "Marco Rossi", "Parrot feed mix", "02 Feb 2025", "Open"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn people_screens_share_the_users_collection() {
        for screen in [Screen::Users, Screen::Vendors, Screen::Breeders, Screen::Veterinary] {
            assert_eq!(screen.collection(), Some(Collection::Users));
            assert!(screen.role().is_some());
        }
    }

    #[test]
    fn mock_screens_have_no_remote_collection() {
        for screen in [
            Screen::GeneralListings,
            Screen::Payments,
            Screen::Feeds,
            Screen::Pairs,
            Screen::FeedRequests,
            Screen::Promotions,
        ] {
            assert!(screen.is_mock());
            assert!(screen.role().is_none());
        }
    }

    #[test]
    fn every_screen_has_columns_matching_its_rows() {
        for screen in Screen::ALL {
            assert!(!screen.columns().is_empty(), "{:?}", screen);
            if let Some(index) = screen.status_column() {
                assert!(index < screen.columns().len(), "{:?}", screen);
            }
        }

        let row = general_listing_row(&seed_general_listings().remove(0));
        assert_eq!(row.cells.len(), Screen::GeneralListings.columns().len());
        let row = promotion_row(&seed_promotions().remove(0));
        assert_eq!(row.cells.len(), Screen::Promotions.columns().len());
    }

    #[test]
    fn screen_cycle_visits_every_screen_once() {
        let mut screen = Screen::Users;
        let mut seen = Vec::new();
        for _ in 0..Screen::ALL.len() {
            seen.push(screen);
            screen = screen.next();
        }
        assert_eq!(screen, Screen::Users);
        assert_eq!(seen.len(), Screen::ALL.len());
        assert_eq!(Screen::Users.prev(), Screen::Promotions);
    }

    #[test]
    fn status_column_points_at_the_status_cell() {
        let payment = seed_payments().remove(0);
        let row = payment_row(&payment);
        let column = Screen::Payments.status_column().unwrap();
        assert_eq!(row.cells[column], "Paid");

        assert_eq!(Screen::Pricing.status_column(), None);
    }

    #[test]
    fn edit_form_is_rebuilt_from_the_record_each_time() {
        let mut payment = seed_payments().remove(0);
        let form = payment_form(Some(&payment));
        assert_eq!(form.value("name").unwrap(), "Amara Khan");

        payment.name = "Renamed".to_string();
        let reopened = payment_form(Some(&payment));
        assert_eq!(reopened.value("name").unwrap(), "Renamed");
    }

    #[test]
    fn listings_cannot_be_created_from_the_console() {
        assert!(!Screen::Listings.can_create());
        assert!(Screen::Listings.has_filter());
        assert!(Screen::Pricing.can_create());
        assert!(Screen::GeneralListings.can_create());
        assert!(Screen::Promotions.can_create());
    }

    #[test]
    fn filter_form_edits_the_language() {
        let filters = ListingFilters::baseline();
        let form = listing_filter_form(&filters);
        assert_eq!(form.value("lang").unwrap(), "ur");

        let mut custom = ListingFilters::baseline();
        custom.lang = Some("en".to_string());
        let form = listing_filter_form(&custom);
        assert_eq!(form.value("lang").unwrap(), "en");
        assert_eq!(form.submit_label, "apply");
    }

    #[test]
    fn new_promotion_requires_an_image_but_an_edit_does_not() {
        let mut form = promotion_form(None);
        assert!(!form.validate());
        assert!(form.validation_errors.contains_key("image"));

        let banner = seed_promotions().remove(0);
        let mut form = promotion_form(Some(&banner));
        assert!(form.validate());
        assert_eq!(form.value("title").unwrap(), banner.title);
    }
}
