//! The single planning page served for browser (form) clients.

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
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

#[derive(Debug, Default)]
pub struct PageView<'a> {
    /// Already-rendered plan HTML.
    pub plan_html: Option<&'a str>,
    pub city: Option<&'a str>,
    pub places: &'a [String],
    pub error: Option<&'a str>,
}

pub fn render(view: &PageView<'_>) -> String {
    let mut body = String::new();

    if let Some(error) = view.error {
        body.push_str(&format!("<p class=\"error\">{}</p>\n", escape(error)));
    }

    if let Some(plan) = view.plan_html {
        let heading = match view.city {
            Some(city) => format!("Your day in {}", escape(city)),
            None => "Your day".to_string(),
        };
        body.push_str(&format!(
            "<section class=\"plan\">\n<h2>{}</h2>\n{}</section>\n",
            heading, plan
        ));
    }

    if !view.places.is_empty() {
        body.push_str("<section class=\"places\">\n<h3>Places on this plan</h3>\n<ul>\n");
        for place in view.places {
            body.push_str(&format!("<li>{}</li>\n", escape(place)));
        }
        body.push_str("</ul>\n</section>\n");
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Day Trip Planner</title>
</head>
<body>
<h1>Day Trip Planner</h1>
<form method="post" action="/generate-plan">
<label>City <input name="city" required value="{city}"></label>
<label>Date <input type="date" name="date"></label>
<label>Budget <select name="budget"><option>low</option><option selected>medium</option><option>high</option></select></label>
<label>Pace <select name="pace"><option>relaxed</option><option selected>medium</option><option>packed</option></select></label>
<fieldset><legend>Preferences</legend>
<label><input type="checkbox" name="preferences" value="museums"> Museums</label>
<label><input type="checkbox" name="preferences" value="food"> Food</label>
<label><input type="checkbox" name="preferences" value="nature"> Nature</label>
<label><input type="checkbox" name="preferences" value="nightlife"> Nightlife</label>
<label><input type="checkbox" name="preferences" value="shopping"> Shopping</label>
</fieldset>
<button type="submit">Plan my day</button>
</form>
{body}</body>
</html>
"#,
        city = escape(view.city.unwrap_or_default()),
        body = body,
    )
}
