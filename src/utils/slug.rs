/// Lower-case, accent-folded, dash-separated form of a display name.
///
/// `"Electrónicos"` becomes `"electronicos"`, `"Set de Cocina"` becomes `"set-de-cocina"`.
pub fn slugify(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_dash = false;

    for c in text.chars().flat_map(|c| c.to_lowercase()) {
        if c.is_ascii_alphanumeric() {
            out.push(c);
            prev_dash = false;
        } else if let Some(folded) = fold_accent(c) {
            out.push_str(folded);
            prev_dash = false;
        } else if !out.is_empty() && !prev_dash {
            out.push('-');
            prev_dash = true;
        }
    }

    out.trim_matches('-').to_string()
}

fn fold_accent(c: char) -> Option<&'static str> {
    let folded = match c {
        'á' | 'à' | 'â' | 'ä' | 'ã' | 'å' => "a",
        'é' | 'è' | 'ê' | 'ë' => "e",
        'í' | 'ì' | 'î' | 'ï' => "i",
        'ó' | 'ò' | 'ô' | 'ö' | 'õ' | 'ø' => "o",
        'ú' | 'ù' | 'û' | 'ü' => "u",
        'ñ' => "n",
        'ç' => "c",
        'ý' | 'ÿ' => "y",
        'ß' => "ss",
        'æ' => "ae",
        'œ' => "oe",
        _ => return None,
    };
    Some(folded)
}

#[cfg(test)]
mod tests {
    use super::slugify;

    #[test]
    fn seed_category_names() {
        let slugs: Vec<String> = ["Electrónicos", "Ropa", "Hogar", "Deportes", "Belleza"]
            .iter()
            .map(|name| slugify(name))
            .collect();
        assert_eq!(slugs, ["electronicos", "ropa", "hogar", "deportes", "belleza"]);
    }

    #[test]
    fn separators_collapse() {
        assert_eq!(slugify("  Laptop ProBook 15\"  "), "laptop-probook-15");
        assert_eq!(slugify("Crema Hidratante Anti-edad"), "crema-hidratante-anti-edad");
        assert_eq!(slugify("Balón de Fútbol -- Oficial"), "balon-de-futbol-oficial");
        assert_eq!(slugify("Niño & Señora"), "nino-senora");
    }

    #[test]
    fn nothing_sluggable() {
        assert_eq!(slugify("¡¿?!"), "");
    }
}
