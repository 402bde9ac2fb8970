use std::fmt::Write;

use crate::browser::View;
use crate::data_models::RestaurantRecord;

pub const OFFLINE_NOTICE: &str = "Looks like you are offline. Check your internet connection!!!";
pub const SEARCH_PLACEHOLDER: &str = "Search by Name or Cuisine...";
pub const TOP_RATED_LABEL: &str = "Top Rated Restaurants";

const SHIMMER_CARDS: usize = 12;

/// Link target for a restaurant's detail page.
pub fn restaurant_link(id: &str) -> String {
    format!("/restaurant/{id}")
}

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn render_page(view: &View) -> String {
    let body = match view {
        View::Loading => render_shimmer(),
        View::Offline => render_offline(),
        View::Ready {
            search_input,
            restaurants,
        } => render_body(search_input, restaurants),
    };
    layout("Restaurants", &(body + &state_poll_script(view)))
}

pub fn render_grid(restaurants: &[RestaurantRecord]) -> String {
    let mut out = String::from("<div class=\"res-container\" id=\"res-container\">");
    for restaurant in restaurants {
        let _ = write!(
            out,
            "<a href=\"{}\">{}</a>",
            escape_html(&restaurant_link(restaurant.id())),
            render_card(restaurant)
        );
    }
    out.push_str("</div>");
    out
}

/// Grid fragment for `/grid`. Cards only appear in the Ready state; Offline
/// swaps the notice in place of the grid.
pub fn render_grid_for(view: &View) -> String {
    match view {
        View::Ready { restaurants, .. } => render_grid(restaurants),
        View::Loading => {
            "<div class=\"res-container\" id=\"res-container\" data-state=\"loading\"></div>"
                .to_string()
        }
        View::Offline => format!(
            "<div class=\"res-container\" id=\"res-container\" data-state=\"offline\">{}</div>",
            render_offline()
        ),
    }
}

pub fn render_card(restaurant: &RestaurantRecord) -> String {
    let mut out = String::from("<div class=\"res-card\">");
    let _ = write!(out, "<h3>{}</h3>", escape_html(restaurant.name()));
    let _ = write!(
        out,
        "<h4 class=\"cuisines\">{}</h4>",
        escape_html(&restaurant.info.cuisines.join(", "))
    );
    let _ = write!(out, "<h4 class=\"rating\">{} stars</h4>", restaurant.avg_rating());
    if let Some(cost) = restaurant.cost_for_two() {
        let _ = write!(out, "<h4 class=\"cost\">{}</h4>", escape_html(cost));
    }
    if let Some(minutes) = restaurant.delivery_time() {
        let _ = write!(out, "<h4 class=\"eta\">{minutes} minutes</h4>");
    }
    out.push_str("</div>");
    out
}

pub fn render_restaurant(restaurant: &RestaurantRecord) -> String {
    let body = format!(
        "<div class=\"menu\"><a href=\"/\">Back</a>{}</div>",
        render_card(restaurant)
    );
    layout(restaurant.name(), &body)
}

fn render_body(search_input: &str, restaurants: &[RestaurantRecord]) -> String {
    let mut out = String::from("<div class=\"body\"><div class=\"filter\"><div class=\"search\">");
    let _ = write!(
        out,
        "<input type=\"search\" id=\"search\" placeholder=\"{}\" value=\"{}\" />",
        escape_html(SEARCH_PLACEHOLDER),
        escape_html(search_input)
    );
    let _ = write!(
        out,
        "</div><button class=\"filter-btn\" id=\"top-rated\">{}</button></div>",
        escape_html(TOP_RATED_LABEL)
    );
    out.push_str(&render_grid(restaurants));
    out.push_str("</div>");
    out.push_str(CLIENT_SCRIPT);
    out
}

fn render_offline() -> String {
    format!("<h1 class=\"offline\">{}</h1>", escape_html(OFFLINE_NOTICE))
}

/// Reloads the page once `/api/restaurants` reports a different state, so a
/// placeholder turns into the listing when the fetch lands.
fn state_poll_script(view: &View) -> String {
    STATE_POLL_SCRIPT.replace("{state}", view.name())
}

fn render_shimmer() -> String {
    let mut out = String::from("<div class=\"shimmer-container\">");
    for _ in 0..SHIMMER_CARDS {
        out.push_str("<div class=\"shimmer-card\"></div>");
    }
    out.push_str("</div>");
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>{}</title>\
         <link rel=\"stylesheet\" href=\"/static/styles.css\"></head><body>{body}</body></html>",
        escape_html(title)
    )
}

// Keystrokes go to /api/search, which debounces server side; the grid is
// re-read once the quiet window has passed.
const CLIENT_SCRIPT: &str = r#"<script>
(function () {
  var refreshTimer;
  function refreshGrid(delay) {
    clearTimeout(refreshTimer);
    refreshTimer = setTimeout(function () {
      fetch('/grid').then(function (r) { return r.text(); }).then(function (html) {
        document.getElementById('res-container').outerHTML = html;
      });
    }, delay);
  }
  document.getElementById('search').addEventListener('input', function (e) {
    fetch('/api/search', {
      method: 'POST',
      headers: { 'Content-Type': 'application/json' },
      body: JSON.stringify({ query: e.target.value })
    }).then(function (r) { return r.json(); }).then(function (res) {
      refreshGrid(res.debounce_ms + 50);
    });
  });
  document.getElementById('top-rated').addEventListener('click', function () {
    fetch('/api/top-rated', { method: 'POST' }).then(function () { refreshGrid(0); });
  });
})();
</script>"#;

const STATE_POLL_SCRIPT: &str = r#"<script>
(function () {
  var current = '{state}';
  setInterval(function () {
    fetch('/api/restaurants').then(function (r) { return r.json(); }).then(function (res) {
      if (res.state !== current) { window.location.reload(); }
    });
  }, 1000);
})();
</script>"#;

#[test]
fn test_escape_html() {
    assert_eq!(escape_html("Domino's <Pizza> & \"Co\""), "Domino&#39;s &lt;Pizza&gt; &amp; &quot;Co&quot;");
    assert_eq!(escape_html("plain"), "plain");
}

#[test]
fn test_restaurant_link() {
    assert_eq!(restaurant_link("123"), "/restaurant/123");
}

#[test]
fn test_render_card_optional_fields() {
    let mut restaurant =
        RestaurantRecord::new("5", "Domino's <Pizza>", 4.1).with_cuisines(["Pizzas", "Italian"]);
    let plain = render_card(&restaurant);
    assert!(plain.contains("Domino&#39;s &lt;Pizza&gt;"));
    assert!(plain.contains("Pizzas, Italian"));
    assert!(plain.contains("4.1 stars"));
    assert!(!plain.contains("class=\"cost\""));

    restaurant
        .info
        .extra
        .insert("costForTwo".into(), serde_json::json!("₹400 for two"));
    restaurant
        .info
        .extra
        .insert("sla".into(), serde_json::json!({ "deliveryTime": 25 }));
    let full = render_card(&restaurant);
    assert!(full.contains("₹400 for two"));
    assert!(full.contains("25 minutes"));
}

#[test]
fn test_render_page_states() {
    let loading = render_page(&View::Loading);
    assert!(loading.contains("shimmer-container"));
    assert!(loading.contains("fetch('/api/restaurants')"));
    assert!(loading.contains("var current = 'loading'"));

    let offline = render_page(&View::Offline);
    assert!(offline.contains("Looks like you are offline"));
    assert!(offline.contains("var current = 'offline'"));

    let ready = render_page(&View::Ready {
        search_input: "\"pizza\"".to_string(),
        restaurants: vec![RestaurantRecord::new("1", "Pizza Hut", 4.2)],
    });
    assert!(ready.contains("value=\"&quot;pizza&quot;\""));
    assert!(ready.contains("<a href=\"/restaurant/1\">"));
    assert!(ready.contains("var current = 'ready'"));
}

#[test]
fn test_render_grid_for_states() {
    let offline = render_grid_for(&View::Offline);
    assert!(offline.contains("id=\"res-container\""));
    assert!(offline.contains(OFFLINE_NOTICE));
    assert!(!offline.contains("res-card"));

    assert!(!render_grid_for(&View::Loading).contains("res-card"));

    let ready = render_grid_for(&View::Ready {
        search_input: String::new(),
        restaurants: vec![RestaurantRecord::new("1", "Pizza Hut", 4.2)],
    });
    assert!(ready.contains("Pizza Hut"));
}
