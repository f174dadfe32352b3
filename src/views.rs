use serde_json::{json, Value};

use crate::dataset::{Crosstab, Dataset};
use crate::page::html_escape;

/// One dashboard section: a heading plus a ready-to-embed HTML body.
pub struct Section {
    pub heading: String,
    pub body: String,
}

impl Section {
    fn new(heading: &str, body: String) -> Section {
        Section {
            heading: heading.to_string(),
            body,
        }
    }
}

/// The loaded records as a plain HTML table.
pub fn source_table(dataset: &Dataset) -> Section {
    let mut body = String::from(
        "<table>\n<tr><th>gender</th><th>years_of_education</th>\
         <th>employment_status</th><th>age</th><th>generation</th></tr>\n",
    );
    for record in dataset.records() {
        body.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            html_escape(&record.gender),
            record.years_of_education,
            html_escape(&record.employment_status),
            record.age,
            html_escape(&record.generation),
        ));
    }
    body.push_str("</table>");
    Section::new("Source data", body)
}

/// Bar chart of people per gender.
pub fn gender_view(dataset: &Dataset) -> Section {
    let (labels, counts) = split(dataset.gender_counts());
    let data = json!([{ "type": "bar", "x": labels, "y": counts }]);
    let layout = axis_titles("Gender", "People");
    Section::new("People per gender", chart("gender", &data, &layout))
}

/// Bar chart of mean years of education per gender.
pub fn education_view(dataset: &Dataset) -> Section {
    let (labels, means): (Vec<String>, Vec<f64>) =
        dataset.mean_education_by_gender().into_iter().unzip();
    let data = json!([{
        "type": "bar",
        "x": labels,
        "y": means,
        "marker": { "color": "#00aa00" },
    }]);
    let layout = axis_titles("Gender", "Mean years of education");
    Section::new(
        "Mean years of education per gender",
        chart("education", &data, &layout),
    )
}

/// Pie chart of employment status proportions.
pub fn employment_view(dataset: &Dataset) -> Section {
    let (labels, counts) = split(dataset.employment_counts());
    let data = json!([{
        "type": "pie",
        "labels": labels,
        "values": counts,
        "textinfo": "label+percent",
    }]);
    Section::new(
        "Employment status distribution",
        chart("employment", &data, &json!({})),
    )
}

/// Bar chart of people per age bucket.
pub fn age_view(dataset: &Dataset) -> Section {
    let (labels, counts) = split_buckets(dataset);
    let data = json!([{ "type": "bar", "x": labels, "y": counts }]);
    let layout = axis_titles("Age", "People");
    Section::new("Age group distribution", chart("age", &data, &layout))
}

/// Horizontal bar chart of people per generation.
pub fn generation_view(dataset: &Dataset) -> Section {
    let (labels, counts) = split(dataset.generation_counts());
    let data = json!([{
        "type": "bar",
        "orientation": "h",
        "x": counts,
        "y": labels,
        "marker": { "color": "#ffaa00" },
    }]);
    let layout = axis_titles("People", "Generation");
    Section::new("People per generation", chart("generation", &data, &layout))
}

/// Stacked histogram of the age distribution.
pub fn age_histogram(dataset: &Dataset) -> Section {
    let (labels, counts) = split_buckets(dataset);
    let data = json!([{ "type": "bar", "x": labels, "y": counts, "name": "People" }]);
    let mut layout = axis_titles("Age", "People");
    layout["barmode"] = json!("stack");
    Section::new("Age histogram", chart("age_histogram", &data, &layout))
}

/// Grouped histogram of the age distribution, one trace per gender.
pub fn age_gender_histogram(dataset: &Dataset) -> Section {
    let Crosstab { genders, rows } = dataset.age_gender_crosstab();
    let labels: Vec<&str> = rows.iter().map(|(bucket, _)| bucket.label()).collect();
    let data: Vec<Value> = genders
        .iter()
        .enumerate()
        .map(|(col, gender)| {
            let counts: Vec<u64> = rows.iter().map(|(_, row)| row[col]).collect();
            json!({ "type": "bar", "name": gender, "x": labels, "y": counts })
        })
        .collect();
    let mut layout = axis_titles("Age", "People");
    layout["barmode"] = json!("group");
    Section::new(
        "Age and gender histogram",
        chart("age_gender", &json!(data), &layout),
    )
}

fn split(counts: Vec<(String, u64)>) -> (Vec<String>, Vec<u64>) {
    counts.into_iter().unzip()
}

fn split_buckets(dataset: &Dataset) -> (Vec<&'static str>, Vec<u64>) {
    dataset
        .age_distribution()
        .into_iter()
        .map(|(bucket, count)| (bucket.label(), count))
        .unzip()
}

fn axis_titles(x: &str, y: &str) -> Value {
    json!({
        "xaxis": { "title": { "text": x } },
        "yaxis": { "title": { "text": y } },
    })
}

fn chart(id: &str, data: &Value, layout: &Value) -> String {
    // "</" would end the script block early if a label contained it.
    let data = data.to_string().replace("</", "<\\/");
    let layout = layout.to_string().replace("</", "<\\/");
    format!(
        "<div id=\"{id}\" class=\"chart\"></div>\n\
         <script>Plotly.newPlot(\"{id}\", {data}, {layout}, {{\"displaylogo\": false}});</script>"
    )
}
