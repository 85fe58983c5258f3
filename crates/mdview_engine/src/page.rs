use mdview_core::{FilePicker, PageBody, PageView};

const STYLE: &str = "body{max-width:860px;margin:0 auto;padding:2rem 1rem;\
font-family:-apple-system,'Segoe UI',Helvetica,Arial,sans-serif;line-height:1.6;color:#1f2328}\
pre,code{background:#f6f8fa;border-radius:4px}pre{padding:1rem;overflow:auto}\
table{border-collapse:collapse}th,td{border:1px solid #d0d7de;padding:.3rem .8rem}\
img{max-width:100%}.error{border-left:4px solid #cf222e;padding:0 1rem}\
.error pre{white-space:pre-wrap}.loading{color:#656d76}.picker{margin-top:2rem}";

/// Render the view model as a complete HTML document.
///
/// The content region is `<main id="content">`; a `<base>` element is only
/// emitted when the view carries a base href.
pub fn present_page(view: &PageView) -> String {
    let mut page = String::with_capacity(4096);
    page.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    page.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    page.push_str(&format!("<title>{}</title>\n", escape_html(&view.title)));
    if let Some(base) = &view.base_href {
        page.push_str(&format!("<base href=\"{}\">\n", escape_html(base)));
    }
    page.push_str(&format!("<style>{STYLE}</style>\n</head>\n<body>\n"));
    page.push_str("<main id=\"content\">\n");
    page.push_str(&render_body(&view.body));
    page.push_str("</main>\n</body>\n</html>\n");
    page
}

fn render_body(body: &PageBody) -> String {
    match body {
        PageBody::Blank => String::new(),
        PageBody::Loading { url } => {
            format!("<p class=\"loading\">Loading {}</p>\n", escape_html(url))
        }
        PageBody::Document { html } => html.clone(),
        PageBody::Welcome { html, picker } => format!("{html}{}", render_picker(picker)),
        PageBody::Error {
            title,
            message,
            detail,
        } => format!(
            "<section class=\"error\">\n<h2>{}</h2>\n<p>{}</p>\n<pre>{}</pre>\n</section>\n",
            escape_html(title),
            escape_html(message),
            escape_html(detail)
        ),
    }
}

fn render_picker(picker: &FilePicker) -> String {
    format!(
        "<form class=\"picker\">\n<label for=\"file-picker\">Open a local file / 打开本地文件</label>\n\
<input type=\"file\" id=\"file-picker\" accept=\"{}\">\n</form>\n",
        escape_html(&picker.accept.join(","))
    )
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}
