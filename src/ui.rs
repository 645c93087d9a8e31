use crate::models::DayView;

pub fn render_index(view: &DayView) -> String {
    let goal = match &view.goal {
        Some(goal) => format!(
            "{} {}",
            goal.display_value,
            match goal.unit {
                crate::models::VolumeUnit::Milliliters => "ml",
                crate::models::VolumeUnit::FluidOunces => "oz",
            }
        ),
        None => "not set".to_string(),
    };

    INDEX_HTML
        .replace("{{LABEL}}", &view.label)
        .replace("{{DATE}}", &view.date.to_string())
        .replace("{{DRANK}}", &view.drank_ml.to_string())
        .replace("{{COUNT}}", &view.count.to_string())
        .replace("{{GOAL}}", &goal)
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Water Tracker</title>
  <style>
    body {
      margin: 0;
      min-height: 100vh;
      display: grid;
      place-items: center;
      background: linear-gradient(160deg, #e8f6ff, #c9e9fb);
      color: #16374c;
      font-family: "Trebuchet MS", sans-serif;
    }
    .card {
      background: rgba(255, 255, 255, 0.9);
      border-radius: 20px;
      box-shadow: 0 18px 40px rgba(22, 55, 76, 0.18);
      padding: 32px 40px;
      display: grid;
      gap: 10px;
      min-width: 280px;
    }
    h1 { margin: 0 0 4px; font-size: 1.8rem; }
    .row { display: flex; justify-content: space-between; gap: 24px; }
    .row .value { font-weight: 600; color: #0c86c4; }
    .date { color: #5d7486; font-size: 0.9rem; }
  </style>
</head>
<body>
  <main class="card">
    <h1>{{LABEL}}</h1>
    <span class="date">{{DATE}}</span>
    <div class="row"><span>Goal</span><span class="value">{{GOAL}}</span></div>
    <div class="row"><span>Drank</span><span class="value">{{DRANK}} ml</span></div>
    <div class="row"><span>Drinks</span><span class="value">{{COUNT}}</span></div>
  </main>
</body>
</html>
"#;
