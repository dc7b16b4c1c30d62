// src/noyau/erreur.rs
//
// Erreurs du noyau : une variante par famille d’échec.
// Aucune n’est rattrapée en interne : tout remonte à l’appelant via `?`.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErreurCalcul {
    /// Jeton inclassable, parenthèses déséquilibrées, variable inconnue,
    /// pile vide pendant la conversion ou l’évaluation.
    #[error("expression invalide : {0}")]
    ExpressionInvalide(String),

    #[error("division par zéro")]
    DivisionParZero,

    #[error("résultat NaN (puissance non définie)")]
    ResultatNaN,

    #[error("nombre infini (dépassement de la puissance)")]
    NombreInfini,

    /// Échelle hors [1, 32] ou mode d’arrondi interdisant l’arrondi.
    #[error("configuration invalide : {0}")]
    ConfigInvalide(String),
}

pub type Resultat<T> = Result<T, ErreurCalcul>;

impl ErreurCalcul {
    pub(crate) fn invalide(msg: impl Into<String>) -> Self {
        ErreurCalcul::ExpressionInvalide(msg.into())
    }
}
