//! HTML pages.
//!
//! Every piece of stored or user-supplied text goes through [`esc`] before it
//! is placed in markup.

use std::borrow::Cow;

use juicios_core::{Case, CaseMovements, Movement};
use quick_xml::escape::escape;

fn esc(s: &str) -> Cow<'_, str> { escape(s) }

fn layout(title: &str, body: &str) -> String {
  format!(
    "<!DOCTYPE html>
<html lang=\"es\">
<head>
<meta charset=\"utf-8\">
<title>{title}</title>
</head>
<body>
{body}
</body>
</html>
",
    title = esc(title),
  )
}

fn case_fields(case: Option<&Case>) -> String {
  let value = |f: fn(&Case) -> &str| case.map(f).map(esc).unwrap_or_default();
  let last = case
    .and_then(|c| c.last_movement.as_deref())
    .map(esc)
    .unwrap_or_default();
  format!(
    "<label>Número de expediente <input name=\"case_number\" value=\"{number}\" required></label>
<label>Carátula <input name=\"caption\" value=\"{caption}\" required></label>
<label>Tema <input name=\"topic\" value=\"{topic}\" required></label>
<label>Último movimiento <input name=\"last_movement\" value=\"{last}\"></label>",
    number = value(|c| c.case_number.as_str()),
    caption = value(|c| c.caption.as_str()),
    topic = value(|c| c.topic.as_str()),
  )
}

// ─── Pages ────────────────────────────────────────────────────────────────────

/// `GET /`: the case list, optionally filtered by `search`.
pub fn index(cases: &[Case], search: &str) -> String {
  let mut rows = String::new();
  for case in cases {
    rows.push_str(&format!(
      "<tr><td>{title}</td><td>{last}</td>\
       <td><a href=\"/edit/{id}\">Editar</a> <a href=\"/movements/{id}\">Movimientos</a></td></tr>\n",
      id = case.id,
      title = esc(&case.title()),
      last = esc(case.last_movement.as_deref().unwrap_or("")),
    ));
  }

  let listing = if cases.is_empty() {
    "<p class=\"not-found\">No se encontraron juicios.</p>".to_owned()
  } else {
    format!(
      "<table>\n<tr><th>Juicio</th><th>Último movimiento</th><th></th></tr>\n{rows}</table>"
    )
  };

  let body = format!(
    "<h1>Juicios</h1>
<form method=\"get\" action=\"/\">
<input name=\"search\" value=\"{search}\" placeholder=\"Buscar\">
<button type=\"submit\">Buscar</button>
</form>
{listing}
<h2>Nuevo juicio</h2>
<form method=\"post\" action=\"/add\">
{fields}
<button type=\"submit\">Agregar</button>
</form>
<p><a href=\"/export\">Exportar a Excel</a></p>",
    search = esc(search),
    fields = case_fields(None),
  );
  layout("Juicios", &body)
}

/// `GET /edit/{case_id}`
pub fn edit(case: &Case) -> String {
  let body = format!(
    "<h1>Editar juicio</h1>
<form method=\"post\" action=\"/edit/{id}\">
{fields}
<button type=\"submit\">Guardar</button>
</form>
<p><a href=\"/\">Volver</a></p>",
    id = case.id,
    fields = case_fields(Some(case)),
  );
  layout(&format!("Editar {}", case.case_number), &body)
}

fn movement_row(m: &Movement) -> String {
  let attachment = match (m.attachment.as_deref(), m.attachment_label()) {
    (Some(key), Some(label)) => {
      format!("<a href=\"/uploads/{}\">{}</a>", esc(key), esc(label))
    }
    _ => String::new(),
  };
  format!(
    "<tr><td>{date}</td><td>{description}</td><td>{attachment}</td>\
     <td><a href=\"/delete_movement/{id}\">Eliminar</a></td></tr>\n",
    id = m.id,
    date = esc(&m.date),
    description = esc(&m.description),
  )
}

/// `GET /movements/{case_id}`
pub fn movements(view: &CaseMovements) -> String {
  let case = &view.case;
  let rows: String = view.movements.iter().map(movement_row).collect();

  let body = format!(
    "<h1>Movimientos</h1>
<h2>{number} - {caption}</h2>
<table>
<tr><th>Fecha</th><th>Descripción</th><th>Archivo</th><th></th></tr>
{rows}</table>
<h2>Nuevo movimiento</h2>
<form method=\"post\" action=\"/add_movement/{id}\" enctype=\"multipart/form-data\">
<label>Fecha <input type=\"date\" name=\"date\" required></label>
<label>Descripción <input name=\"description\" required></label>
<label>Archivo (PDF) <input type=\"file\" name=\"attachment\" accept=\".pdf\"></label>
<button type=\"submit\">Agregar</button>
</form>
<p><a href=\"/\">Volver</a></p>",
    id = case.id,
    number = esc(&case.case_number),
    caption = esc(&case.caption),
  );
  layout(&format!("Movimientos {}", case.case_number), &body)
}

/// Body of every 404 response.
pub fn not_found(what: &str) -> String {
  let body = format!(
    "<h1>No encontrado</h1>\n<p>{}</p>\n<p><a href=\"/\">Volver</a></p>",
    esc(what)
  );
  layout("No encontrado", &body)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn case() -> Case {
    Case {
      id:            3,
      case_number:   "EXP-1".into(),
      caption:       "<script>alert(1)</script>".into(),
      topic:         "Civil".into(),
      last_movement: Some("\"Audiencia\"".into()),
    }
  }

  #[test]
  fn index_escapes_stored_text() {
    let html = index(&[case()], "");
    assert!(!html.contains("<script>"));
    assert!(html.contains("&lt;script&gt;"));
    assert!(html.contains("/movements/3"));
  }

  #[test]
  fn index_without_cases_shows_notice() {
    let html = index(&[], "nada");
    assert!(html.contains("No se encontraron juicios"));
    assert!(html.contains("value=\"nada\""));
  }

  #[test]
  fn edit_prefills_fields() {
    let html = edit(&case());
    assert!(html.contains("action=\"/edit/3\""));
    assert!(html.contains("value=\"EXP-1\""));
    assert!(html.contains("value=\"&quot;Audiencia&quot;\""));
  }

  #[test]
  fn movement_links_attachment_by_key_with_display_name() {
    let view = CaseMovements {
      case:      case(),
      movements: vec![Movement {
        id:              9,
        case_id:         3,
        date:            "2024-01-01".into(),
        description:     "Pericia".into(),
        attachment:      Some("abc.pdf".into()),
        attachment_name: Some("pericia.pdf".into()),
      }],
    };
    let html = movements(&view);
    assert!(html.contains("<a href=\"/uploads/abc.pdf\">pericia.pdf</a>"));
    assert!(html.contains("/delete_movement/9"));
    assert!(html.contains("multipart/form-data"));
  }
}
