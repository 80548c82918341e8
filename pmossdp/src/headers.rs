//! En-têtes SSDP
//!
//! Les en-têtes sont une liste ordonnée de paires `(nom, valeur)` : l'ordre est
//! conservé de la lecture à l'écriture et un même nom peut apparaître plusieurs
//! fois.

use crate::error::{Result, SsdpError};
use std::collections::{BTreeMap, HashMap};

/// Liste ordonnée des en-têtes d'un message
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Headers(Vec<(String, String)>);

impl Headers {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Ajoute un en-tête en fin de liste
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.push((name.into(), value.into()));
    }

    /// Première valeur pour `name` (comparaison insensible à la casse)
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Toutes les valeurs pour `name`, dans l'ordre du message
    pub fn get_all<'a, 'n>(
        &'a self,
        name: &'n str,
    ) -> impl Iterator<Item = &'a str> + use<'a, 'n> {
        self.0
            .iter()
            .filter(move |(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[(String, String)] {
        &self.0
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Headers {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<K: Into<String>, V: Into<String>> From<Vec<(K, V)>> for Headers {
    fn from(pairs: Vec<(K, V)>) -> Self {
        pairs.into_iter().collect()
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for Headers {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

// Les tables clé/valeur sont converties dans leur ordre d'itération naturel.
impl<K: Into<String>, V: Into<String>> From<HashMap<K, V>> for Headers {
    fn from(map: HashMap<K, V>) -> Self {
        map.into_iter().collect()
    }
}

impl<K: Into<String>, V: Into<String>> From<BTreeMap<K, V>> for Headers {
    fn from(map: BTreeMap<K, V>) -> Self {
        map.into_iter().collect()
    }
}

impl IntoIterator for Headers {
    type Item = (String, String);
    type IntoIter = std::vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Headers {
    type Item = &'a (String, String);
    type IntoIter = std::slice::Iter<'a, (String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Parse un bloc d'en-têtes HTTP (`Nom: valeur` par ligne).
///
/// - les lignes de continuation (commençant par un espace ou une tabulation)
///   sont repliées sur la valeur précédente, séparées par un espace ;
/// - une ligne vide termine le bloc, la suite est ignorée ;
/// - l'absence de ligne vide finale est tolérée (les datagrammes SSDP n'ont
///   pas de corps), ce qui n'est pas du HTTP strict ;
/// - toute autre ligne invalide produit [`SsdpError::MalformedHeader`].
///
/// Les numéros de ligne des erreurs commencent à 1.
pub fn parse_headers(text: &str) -> Result<Headers> {
    parse_header_lines(text.lines(), 1)
}

pub(crate) fn parse_header_lines<'a, I>(lines: I, first_line_number: usize) -> Result<Headers>
where
    I: Iterator<Item = &'a str>,
{
    let mut headers: Vec<(String, String)> = Vec::new();

    for (offset, line) in lines.enumerate() {
        let line_number = first_line_number + offset;
        let malformed = || SsdpError::MalformedHeader {
            line_number,
            line: line.to_string(),
        };

        if line.is_empty() {
            break;
        }

        // obs-fold, y compris une ligne faite uniquement de blancs
        if line.starts_with([' ', '\t']) {
            let (_, value) = headers.last_mut().ok_or_else(malformed)?;
            let continuation = line.trim();
            if !continuation.is_empty() {
                if !value.is_empty() {
                    value.push(' ');
                }
                value.push_str(continuation);
            }
            continue;
        }

        let (name, value) = line.split_once(':').ok_or_else(malformed)?;
        if name.is_empty() || !name.bytes().all(|b| b.is_ascii_graphic()) {
            return Err(malformed());
        }

        headers.push((name.to_string(), value.trim().to_string()));
    }

    Ok(Headers(headers))
}
