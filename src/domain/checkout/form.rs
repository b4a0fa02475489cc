//! Auto-submitting redirect form.
//!
//! Field names and values are HTML-escaped. The legacy integration
//! interpolated them raw; escaping changes no value the browser posts.

use super::fields::WireFields;

/// DOM id of the rendered form.
const FORM_ID: &str = "ecpay";

/// Renders a minimal HTML document that posts `fields` to `action_url`
/// as soon as it loads. Hidden inputs follow the field set's order.
pub fn render_auto_submit_form(fields: &WireFields, action_url: &str) -> String {
    let mut inputs = String::new();
    for (name, value) in fields.iter() {
        inputs.push_str(&format!(
            "            <input type=\"hidden\" name=\"{}\" value=\"{}\">\n",
            html_escape(name),
            html_escape(&value.to_string())
        ));
    }

    format!(
        r#"<!DOCTYPE html>
<html>
    <head>
        <meta http-equiv="Content-Type" content="text/html; charset=utf-8">
    </head>
    <body>
        <form id="{id}" method="post" action="{action}">
{inputs}        </form>
        <script>
            document.getElementById("{id}").submit();
        </script>
    </body>
</html>
"#,
        id = FORM_ID,
        action = html_escape(action_url),
        inputs = inputs,
    )
}

/// Escape HTML special characters.
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_posts_to_action_url() {
        let fields: WireFields = [("a", "1")].into_iter().collect();
        let html = render_auto_submit_form(&fields, "https://gw.example/checkout");

        assert!(html.contains(r#"<form id="ecpay" method="post" action="https://gw.example/checkout">"#));
        assert!(html.contains(r#"document.getElementById("ecpay").submit();"#));
    }

    #[test]
    fn one_hidden_input_per_field_in_order() {
        let fields: WireFields = [("Second", "2"), ("First", "1")].into_iter().collect();
        let html = render_auto_submit_form(&fields, "https://gw");

        let second = html.find(r#"name="Second" value="2""#).unwrap();
        let first = html.find(r#"name="First" value="1""#).unwrap();
        assert!(second < first);
        assert_eq!(html.matches(r#"type="hidden""#).count(), 2);
    }

    #[test]
    fn values_are_escaped() {
        let fields: WireFields = [("ItemName", r#""><script>alert('x')</script>"#)]
            .into_iter()
            .collect();
        let html = render_auto_submit_form(&fields, "https://gw");

        assert!(!html.contains("<script>alert"));
        assert!(html.contains(
            r#"value="&quot;&gt;&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt;""#
        ));
    }

    #[test]
    fn ampersand_is_escaped_first() {
        assert_eq!(html_escape("a&lt;b"), "a&amp;lt;b");
        assert_eq!(html_escape("x < y & z"), "x &lt; y &amp; z");
    }

    #[test]
    fn integer_values_render_as_digits() {
        let fields: WireFields = [("TotalAmount", 100u64)].into_iter().collect();
        let html = render_auto_submit_form(&fields, "https://gw");

        assert!(html.contains(r#"name="TotalAmount" value="100""#));
    }
}
