use mailpen::{
    Card, CardGridData, Config, Engine, LogoData, MemorySource, NotificationBoxData,
    NotificationButton, QuoteData, RenderedEmail, TableCell, TableData, TableHeader, TableRow,
    TemplateData, TwoColumnData, TwoColumnRow,
};

fn engine() -> Engine {
    Engine::builder()
        .source(
            MemorySource::new("app")
                .with_file(
                    "emails/headers.html",
                    "{% with text=mainTitle %}{% include 'component:header' %}{% endwith %}\
                     {% with text=subTitle, level=2 %}{% include 'component:header' %}{% endwith %}\
                     {% with text=smallTitle, level=3 %}{% include 'component:header' %}{% endwith %}",
                )
                .with_file(
                    "emails/headers.txt",
                    "{% with text=mainTitle %}{% include 'component:header' %}{% endwith %}\
                     {% with text=subTitle, level=2 %}{% include 'component:header' %}{% endwith %}\
                     {% with text=smallTitle, level=3 %}{% include 'component:header' %}{% endwith %}",
                )
                .with_file("emails/alert.html", "{% include 'component:notification-box' %}")
                .with_file("emails/alert.txt", "{% include 'component:notification-box' %}")
                .with_file("emails/logo.html", "{% include 'component:logo' %}")
                .with_file("emails/logo.txt", "{% include 'component:logo' %}")
                .with_file("emails/table.html", "{% include 'component:data-table' %}")
                .with_file("emails/table.txt", "{% include 'component:data-table' %}")
                .with_file("emails/cards.html", "{% include 'component:card-grid' %}")
                .with_file("emails/cards.txt", "{% include 'component:card-grid' %}")
                .with_file(
                    "emails/receipt.html",
                    "{% include 'component:two-column' %}{% include 'component:quote' %}",
                )
                .with_file(
                    "emails/receipt.txt",
                    "{% include 'component:two-column' %}{% include 'component:quote' %}",
                )
                .with_file("emails/plain.txt", "Thanks!"),
        )
        .build()
        .unwrap()
}

fn render(name: &str, data: &TemplateData) -> RenderedEmail {
    engine().render(name, data, "").unwrap()
}

fn assert_contains_all(haystack: &str, needles: &[&str]) {
    for needle in needles {
        assert!(haystack.contains(needle), "missing {:?} in:\n{}", needle, haystack);
    }
}

fn config() -> Config {
    Config {
        company_name: "ACME Corp".into(),
        company_address1: "1 Main Street".into(),
        support_email: "help@acme.test".into(),
        logo_url: "logo.png".into(),
        ..Config::default()
    }
}

#[test]
fn test_headers_use_theme_sizes_per_level() {
    let data = TemplateData::new()
        .with("mainTitle", "Welcome Message")
        .with("subTitle", "Important Updates")
        .with("smallTitle", "Details Below");

    let email = render("headers", &data);

    assert_contains_all(
        &email.html,
        &[
            "<h1",
            "color: #4DA647;",
            "font-family: Arial, sans-serif;",
            "font-size: 24px;",
            "Welcome Message</h1>",
            "<h2",
            "font-size: 18px;",
            "Important Updates</h2>",
            "<h3",
            "font-size: 16px;",
            "Details Below</h3>",
        ],
    );
    assert_contains_all(
        &email.text,
        &["Welcome Message", "Important Updates", "Details Below"],
    );
}

#[test]
fn test_notification_box_defaults_to_warning_accent() {
    let data = TemplateData::new().with(
        "notification",
        NotificationBoxData {
            title: "Warning".into(),
            message: "Your account needs attention".into(),
            button: Some(NotificationButton {
                text: "Fix Now".into(),
                url: "https://example.com/fix".into(),
                ..NotificationButton::default()
            }),
            ..NotificationBoxData::default()
        },
    );

    let email = render("alert", &data);

    assert_contains_all(
        &email.html,
        &[
            "border-left: 4px solid #ffa500;",
            "color: #ffa500;",
            "background-color: #f8f8f8;",
            "Warning",
            "Your account needs attention",
            ">Fix Now</a>",
        ],
    );
    assert_contains_all(
        &email.text,
        &["Warning", "Your account needs attention", "Fix Now: https://example.com/fix"],
    );
}

#[test]
fn test_notification_box_custom_colors_and_no_button() {
    let data = TemplateData::new().with(
        "notification",
        NotificationBoxData {
            border_color: "#0000ff".into(),
            title_color: "#111111".into(),
            title: "Info".into(),
            message: "All good".into(),
            ..NotificationBoxData::default()
        },
    );

    let email = render("alert", &data);

    assert_contains_all(&email.html, &["border-left: 4px solid #0000ff;", "color: #111111;"]);
    assert!(!email.html.contains("<a "));
    assert!(!email.text.contains(": "));
}

#[test]
fn test_logo_defaults_from_config_and_can_be_overridden() {
    let seeded = TemplateData::for_config(&config());
    let email = render("logo", &seeded);
    assert_contains_all(&email.html, &["src=\"logo.png\"", "alt=\"ACME Corp\""]);
    assert!(email.text.contains("ACME Corp"));

    let overridden = seeded.with(
        "logo",
        LogoData {
            path: "brand.png".into(),
            alt: "Company Logo".into(),
            url: "home".into(),
        },
    );
    let email = render("logo", &overridden);
    assert_contains_all(
        &email.html,
        &["href=\"home\"", "src=\"brand.png\"", "alt=\"Company Logo\""],
    );
    assert!(email.text.contains("Company Logo"));
}

#[test]
fn test_logo_without_path_renders_nothing() {
    let email = render("logo", &TemplateData::new());
    assert!(!email.html.contains("<img"));
    assert!(email.text.trim().is_empty());
}

#[test]
fn test_data_table_renders_headers_and_rows() {
    let row = |cells: [&str; 3]| {
        TableRow::new([
            TableCell::new(cells[0], "30%"),
            TableCell::new(cells[1], "20%"),
            TableCell::new(cells[2], "50%"),
        ])
    };
    let table = TableData {
        headers: vec![
            TableHeader::new("Name", "30%"),
            TableHeader::new("Role", "20%"),
            TableHeader::new("Department", "50%"),
        ],
        rows: vec![
            row(["John Doe", "Engineer", "Development"]),
            row(["Jane Smith", "Manager", "Operations"]),
        ],
    };

    let email = render("table", &TemplateData::new().with("table", table));

    assert_contains_all(
        &email.html,
        &[
            "<th",
            "Department</th>",
            "John Doe</td>",
            "Operations</td>",
            "font-family: Arial, sans-serif;",
            "background-color: #4DA647;",
            "width: 30%",
            "width: 50%",
        ],
    );
    assert_contains_all(
        &email.text,
        &[
            "Name | Role | Department",
            "John Doe | Engineer | Development",
            "Jane Smith | Manager | Operations",
        ],
    );
}

#[test]
fn test_card_grid_renders_every_card() {
    let card = |n: &str, title: &str| Card {
        image_url: format!("product{}.jpg", n),
        image_alt: format!("Product {}", n),
        title: title.into(),
        description: format!("Description of {} product", title.to_lowercase()),
        link_url: format!("https://example.com/product{}", n),
        link_text: "Learn More".into(),
    };
    let grid = CardGridData {
        cards: vec![card("1", "First"), card("2", "Second"), card("3", "Third")],
    };

    let email = render("cards", &TemplateData::new().with("grid", grid));

    assert_contains_all(
        &email.html,
        &[
            "src=\"product1.jpg\"",
            "alt=\"Product 1\"",
            "First</h3>",
            "Description of first product",
            ">Learn More</a>",
            "Third</h3>",
        ],
    );
    assert_eq!(email.html.matches("valign=\"top\"").count(), 3);
    assert_contains_all(
        &email.text,
        &[
            "First",
            "Description of second product",
            "Learn More: https://example.com/product1",
            "Learn More: https://example.com/product3",
        ],
    );
}

#[test]
fn test_two_column_and_quote() {
    let data = TemplateData::new()
        .with(
            "columns",
            [TwoColumnRow::new("Order", "#1234"), TwoColumnRow::new("Total", "$42.00")]
                .into_iter()
                .collect::<TwoColumnData>(),
        )
        .with(
            "quote",
            QuoteData {
                quote_text: "Great service".into(),
                author: "Jane Doe".into(),
                role: "CEO".into(),
                author_image: String::new(),
            },
        );

    let email = render("receipt", &data);

    assert_contains_all(
        &email.html,
        &[
            "Order</td>",
            "#1234</td>",
            "$42.00</td>",
            "Great service",
            "<strong>Jane Doe</strong>",
            "border-left: 4px solid #30C3E6;",
        ],
    );
    assert!(!email.html.contains("<img"));
    assert_contains_all(
        &email.text,
        &["Order: #1234", "Total: $42.00", "\"Great service\"", "-- Jane Doe, CEO"],
    );
}

#[test]
fn test_structured_components_render_nothing_without_data() {
    let engine = engine();
    engine
        .add_source(
            MemorySource::new("bare")
                .with_file("layouts/base.html", "{% block content %}{% endblock %}")
                .with_file("layouts/base.txt", "{% block content %}{% endblock %}"),
        )
        .unwrap();

    for name in ["table", "cards", "receipt", "alert", "logo"] {
        let email = engine.render(name, &TemplateData::new(), "").unwrap();
        assert!(email.html.trim().is_empty(), "{}: {:?}", name, email.html);
        assert!(email.text.trim().is_empty(), "{}: {:?}", name, email.text);
    }
}

#[test]
fn test_footer_uses_seeded_footer_data() {
    let email = render("plain", &TemplateData::for_config(&config()));

    assert!(email.text.starts_with("Thanks!"));
    assert_contains_all(
        &email.text,
        &["--\nACME Corp\n1 Main Street\nhelp@acme.test\n", "All rights reserved."],
    );

    let data = TemplateData::for_config(&config()).merge_keys(
        &TemplateData::new().with("Footer", serde_json::json!({ "CompanyName": "Other Ltd" })),
    );
    let email = render("plain", &data);
    assert!(email.text.contains("--\nOther Ltd\n1 Main Street\n"));
}
