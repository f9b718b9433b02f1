use crate::flash::Flash;
use crate::models::{AppData, SleepEntry};

pub fn render_index(data: &AppData, today: &str, flash: Option<Flash>) -> String {
    let summary = format!(
        "{} of {} nights met the goal",
        data.achieved_count(),
        data.entries.len()
    );

    INDEX_HTML
        .replace("{{STYLE}}", STYLE)
        .replace("{{FLASH}}", &render_flash(flash))
        .replace("{{GOAL}}", &format_hours(data.goal))
        .replace("{{SUMMARY}}", &summary)
        .replace("{{TODAY}}", &escape_html(today))
        .replace("{{ENTRIES}}", &render_entries(&data.entries))
}

pub fn render_goal(data: &AppData, flash: Option<Flash>) -> String {
    GOAL_HTML
        .replace("{{STYLE}}", STYLE)
        .replace("{{FLASH}}", &render_flash(flash))
        .replace("{{GOAL}}", &format_hours(data.goal))
}

/// Hours with at least one decimal place: `8.0`, `7.5`, `6.25`.
pub fn format_hours(hours: f64) -> String {
    if hours.fract() == 0.0 {
        format!("{hours:.1}")
    } else {
        hours.to_string()
    }
}

pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

fn render_flash(flash: Option<Flash>) -> String {
    match flash {
        Some(flash) => format!(
            r#"<div class="flash flash-{}" role="alert">{}</div>"#,
            flash.category().as_str(),
            flash.message()
        ),
        None => String::new(),
    }
}

fn render_entries(entries: &[SleepEntry]) -> String {
    if entries.is_empty() {
        return r#"<tr><td colspan="3" class="empty">No nights recorded yet.</td></tr>"#.to_string();
    }

    entries
        .iter()
        .map(|entry| {
            let (class, mark) = if entry.achieved {
                ("met", "&#10003;")
            } else {
                ("missed", "&#10007;")
            };
            format!(
                r#"<tr><td>{}</td><td>{}</td><td class="{class}">{mark}</td></tr>"#,
                escape_html(&entry.date),
                format_hours(entry.slept)
            )
        })
        .collect::<Vec<_>>()
        .join("\n          ")
}

const STYLE: &str = r#"
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #e9eef8;
      --bg-2: #b9c6e8;
      --ink: #23263a;
      --accent: #5b6cff;
      --accent-2: #2f3a58;
      --ok: #2e8b57;
      --bad: #c8443a;
      --card: rgba(255, 255, 255, 0.86);
      --shadow: 0 24px 60px rgba(47, 58, 88, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #dde4f5 60%, #f2f4fa 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(760px, 100%);
      background: var(--card);
      backdrop-filter: blur(12px);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 24px;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(2rem, 4vw, 2.6rem);
      margin: 0;
    }

    .subtitle {
      margin: 0;
      color: #5f6275;
    }

    .flash {
      border-radius: 14px;
      padding: 12px 16px;
      font-weight: 500;
    }

    .flash-success {
      background: rgba(46, 139, 87, 0.12);
      color: var(--ok);
    }

    .flash-danger {
      background: rgba(200, 68, 58, 0.12);
      color: var(--bad);
    }

    table {
      width: 100%;
      border-collapse: collapse;
      background: white;
      border-radius: 18px;
      overflow: hidden;
    }

    th, td {
      padding: 10px 14px;
      text-align: left;
      border-bottom: 1px solid rgba(47, 58, 88, 0.08);
    }

    td.met {
      color: var(--ok);
    }

    td.missed {
      color: var(--bad);
    }

    td.empty {
      color: #8b8ea0;
      text-align: center;
    }

    form {
      display: flex;
      flex-wrap: wrap;
      gap: 12px;
      align-items: end;
    }

    label {
      display: grid;
      gap: 6px;
      font-size: 0.9rem;
    }

    input {
      border: 1px solid rgba(47, 58, 88, 0.2);
      border-radius: 12px;
      padding: 10px 12px;
      font: inherit;
    }

    button {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 12px 20px;
      font: inherit;
      font-weight: 600;
      cursor: pointer;
      background: var(--accent);
      color: white;
    }

    a {
      color: var(--accent-2);
    }
"#;

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Sleep Tracker</title>
  <style>{{STYLE}}</style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Sleep Tracker</h1>
      <p class="subtitle">Goal: <strong id="goal">{{GOAL}}</strong> hours &middot; <span id="summary">{{SUMMARY}}</span></p>
    </header>
    {{FLASH}}
    <section>
      <form method="post" action="/add_sleep">
        <label>Date
          <input type="date" name="sleep_date" value="{{TODAY}}" required />
        </label>
        <label>Hours slept
          <input type="number" name="hours_slept" step="any" min="0" required />
        </label>
        <button type="submit">Save night</button>
      </form>
    </section>
    <section>
      <table>
        <thead>
          <tr><th>Date</th><th>Hours</th><th>Goal met</th></tr>
        </thead>
        <tbody id="entries">
          {{ENTRIES}}
        </tbody>
      </table>
    </section>
    <footer><a href="/goal">Change sleep goal</a></footer>
  </main>
</body>
</html>
"#;

const GOAL_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Sleep Goal</title>
  <style>{{STYLE}}</style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Sleep Goal</h1>
      <p class="subtitle">Current goal: <strong id="goal">{{GOAL}}</strong> hours per night</p>
    </header>
    {{FLASH}}
    <section>
      <form method="post" action="/set_goal">
        <label>Goal (hours)
          <input type="number" name="goal_hours" step="any" min="0" value="{{GOAL}}" required />
        </label>
        <button type="submit">Update goal</button>
      </form>
    </section>
    <footer><a href="/">Back to overview</a></footer>
  </main>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> AppData {
        let mut data = AppData::default();
        data.record_sleep("2024-01-02", 9.0);
        data.record_sleep("2024-01-01", 7.5);
        data
    }

    #[test]
    fn format_hours_keeps_one_decimal() {
        assert_eq!(format_hours(8.0), "8.0");
        assert_eq!(format_hours(7.5), "7.5");
        assert_eq!(format_hours(6.25), "6.25");
    }

    #[test]
    fn index_lists_entries_in_stored_order() {
        let html = render_index(&sample(), "2024-01-03", None);

        let later = html.find("2024-01-02").unwrap();
        let earlier = html.find("2024-01-01").unwrap();
        assert!(later < earlier);
        assert!(html.contains(r#"<strong id="goal">8.0</strong>"#));
        assert!(html.contains("1 of 2 nights met the goal"));
        assert!(html.contains(r#"name="sleep_date" value="2024-01-03""#));
        assert!(!html.contains("{{"));
        assert!(!html.contains("class=\"flash"));
    }

    #[test]
    fn index_shows_empty_state() {
        let html = render_index(&AppData::default(), "2024-01-03", None);
        assert!(html.contains("No nights recorded yet."));
        assert!(html.contains("0 of 0 nights met the goal"));
    }

    #[test]
    fn index_escapes_dates() {
        let mut data = AppData::default();
        data.record_sleep("<script>", 8.0);
        let html = render_index(&data, "2024-01-03", None);
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<td><script>"));
    }

    #[test]
    fn goal_page_renders_flash_and_form() {
        let html = render_goal(&sample(), Some(Flash::InvalidGoal));
        assert!(html.contains(r#"class="flash flash-danger""#));
        assert!(html.contains("Please enter a valid goal in hours."));
        assert!(html.contains(r#"name="goal_hours" step="any" min="0" value="8.0""#));
        assert!(html.contains(r#"action="/set_goal""#));
    }

    #[test]
    fn fractional_goal_prefills_without_step_limit() {
        let mut data = sample();
        data.set_goal(7.25);
        let goal_page = render_goal(&data, None);
        assert!(goal_page.contains(r#"name="goal_hours" step="any" min="0" value="7.25""#));

        let index = render_index(&data, "2024-01-03", None);
        assert!(index.contains(r#"name="hours_slept" step="any" min="0""#));
        assert!(!index.contains(r#"step="0.1""#));
    }
}
