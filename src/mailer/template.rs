/// Render the summary email body. The summary is embedded as-is inside a
/// `pre` block so line breaks survive; it is not HTML-escaped.
pub fn render_summary_html(summary: &str) -> String {
    format!(
        r#"
      <div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto; padding: 20px;">
        <h2 style="color: #333; border-bottom: 2px solid #4CAF50; padding-bottom: 10px;">
          Meeting Summary
        </h2>
        <div style="background-color: #f9f9f9; padding: 20px; border-radius: 5px; margin: 20px 0;">
          <pre style="white-space: pre-wrap; font-family: inherit; margin: 0;">{summary}</pre>
        </div>
        <p style="color: #666; font-size: 12px; margin-top: 30px;">
          This summary was generated using AI and may require human review.
        </p>
      </div>
    "#
    )
}
