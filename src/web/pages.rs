// ============================================================
// Layer 1 — HTML Page Rendering
// ============================================================
// The single form page, rendered with minijinja. The template is
// compiled into the binary; `.html` templates are auto-escaped,
// so club names and error messages are safe to echo back.

use minijinja::{context, Environment};

use crate::data::dropdown::DropdownOptions;
use crate::domain::error::PredictorResult;
use crate::domain::prediction::{PredictionForm, PredictionResponse};

const INDEX_TEMPLATE: &str = "index.html";

/// Everything the page shows besides the dropdown lists.
#[derive(Debug, Default)]
pub struct PageView<'a> {
    pub form:       Option<&'a PredictionForm>,
    pub prediction: Option<&'a PredictionResponse>,
    pub error:      Option<&'a str>,
}

pub struct PageRenderer {
    env: Environment<'static>,
}

impl PageRenderer {
    pub fn new() -> PredictorResult<Self> {
        let mut env = Environment::new();
        env.add_template(INDEX_TEMPLATE, include_str!("../../templates/index.html"))?;
        Ok(Self { env })
    }

    pub fn render_index(
        &self,
        options: &DropdownOptions,
        run_id:  &str,
        view:    &PageView<'_>,
    ) -> PredictorResult<String> {
        let form = view.form.cloned().unwrap_or_default();
        let html = self.env.get_template(INDEX_TEMPLATE)?.render(context! {
            clubs          => &options.clubs,
            national_teams => &options.national_teams,
            club           => form.club.unwrap_or_default(),
            national_team  => form.national_team.unwrap_or_default(),
            age            => form.age.unwrap_or_default(),
            prediction     => view.prediction.and_then(|p| p.label()),
            error          => view.error,
            run_id         => run_id,
        })?;
        Ok(html)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> DropdownOptions {
        DropdownOptions {
            clubs:          vec!["Liverpool".into(), "Real Madrid".into()],
            national_teams: vec!["Egypt".into()],
        }
    }

    #[test]
    fn test_empty_page_lists_options() {
        let html = PageRenderer::new()
            .unwrap()
            .render_index(&options(), "run-1", &PageView::default())
            .unwrap();
        assert!(html.contains(r#"<option value="Real Madrid">"#));
        assert!(html.contains(r#"<option value="Egypt">"#));
        assert!(!html.contains("class=\"result\""));
    }

    #[test]
    fn test_prediction_is_shown() {
        let prediction = PredictionResponse::Label("Mohamed Salah".into());
        let view = PageView { prediction: Some(&prediction), ..Default::default() };
        let html = PageRenderer::new().unwrap().render_index(&options(), "run-1", &view).unwrap();
        assert!(html.contains("<strong>Mohamed Salah</strong>"));
    }

    #[test]
    fn test_user_input_is_escaped() {
        let form = PredictionForm {
            club: Some("<script>".into()),
            ..Default::default()
        };
        let view = PageView { form: Some(&form), error: Some("bad <age>"), ..Default::default() };
        let html = PageRenderer::new().unwrap().render_index(&options(), "run-1", &view).unwrap();
        assert!(!html.contains("<script>"));
        assert!(html.contains("bad &lt;age&gt;"));
    }
}
