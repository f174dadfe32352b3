use crate::views::Section;

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.32.0.min.js";

const STYLE: &str = "\
body { font-family: sans-serif; max-width: 60rem; margin: 2rem auto; }\n\
table { border-collapse: collapse; }\n\
th, td { border: 1px solid #ccc; padding: 0.3rem 0.6rem; text-align: left; }\n\
hr { margin: 2rem 0; border: none; border-top: 1px solid #ccc; }";

/// Assembles the full dashboard document: title, then every section in the
/// given order, separated by dividers.
pub fn render_page(title: &str, sections: &[Section]) -> String {
    let mut page = format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title}</title>\n\
         <script src=\"{PLOTLY_CDN}\"></script>\n\
         <style>\n{STYLE}\n</style>\n</head>\n<body>\n<h1>{title}</h1>\n",
        title = html_escape(title),
    );
    for (i, section) in sections.iter().enumerate() {
        if i > 0 {
            page.push_str("<hr>\n");
        }
        page.push_str(&format!(
            "<section>\n<h2>{}</h2>\n{}\n</section>\n",
            html_escape(&section.heading),
            section.body,
        ));
    }
    page.push_str("</body>\n</html>\n");
    page
}

pub fn html_escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
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
