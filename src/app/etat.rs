//! src/app/etat.rs
//!
//! État UI (sans vue, sans évaluation).
//!
//! Rôle : contenir l’état de la calculatrice (expression, variables, résultat, erreur,
//! échelle, arrondi, démarche) et offrir des opérations simples (C/CLR/AC).
//!
//! Contrats :
//! - Aucune évaluation ici (pas de parsing, pas de calcul).
//! - Actions déterministes, sans effet de bord caché.
//! - Échelle toujours dans les bornes du noyau.

use calculatrice_postfixe::noyau::config::{ECHELLE_DEFAUT, ECHELLE_MAX, ECHELLE_MIN};
use calculatrice_postfixe::Arrondi;

#[derive(Clone, Default, Debug)]
pub struct Demarche {
    pub canon: String,
    pub jetons: String,
    pub rpn: String,
    pub variables: String,
}

#[derive(Clone, Debug)]
pub struct AppCalc {
    // --- entrées utilisateur ---
    pub entree: String,
    pub variables: String, // "x=3; y=4"

    // --- sorties ---
    pub resultat: String,
    pub erreur: String,
    pub resultat_dispo: bool,

    // --- démarche (panneau d’explication) ---
    pub demarche: Demarche,

    // --- paramètres ---
    pub echelle: u32,
    pub arrondi: Arrondi,

    // --- UX ---
    // Permet à vue.rs de redonner le focus à l’entrée après un clic sur un bouton.
    pub focus_entree: bool,
}

impl Default for AppCalc {
    fn default() -> Self {
        Self {
            entree: String::new(),
            variables: String::new(),
            resultat: String::new(),
            erreur: String::new(),
            resultat_dispo: false,
            demarche: Demarche::default(),
            echelle: ECHELLE_DEFAUT,
            arrondi: Arrondi::HalfEven,
            focus_entree: true, // au lancement, on veut pouvoir taper tout de suite
        }
    }
}

impl AppCalc {
    /* ------------------------ Actions “boutons” (état seulement) ------------------------ */

    /// AC : remise à zéro totale (entrées + résultats + paramètres par défaut).
    pub fn reset_total(&mut self) {
        self.entree.clear();
        self.variables.clear();
        self.clear_resultats();
        self.echelle = ECHELLE_DEFAUT;
        self.arrondi = Arrondi::HalfEven;
        self.focus_entree = true;
    }

    /// C : effacer seulement l’expression (sans toucher aux résultats).
    pub fn clear_entree(&mut self) {
        self.entree.clear();
        self.focus_entree = true;
    }

    /// CLR : effacer résultat + erreur + démarche (sans toucher aux entrées).
    pub fn clear_resultats(&mut self) {
        self.resultat.clear();
        self.erreur.clear();
        self.resultat_dispo = false;
        self.demarche = Demarche::default();
        self.focus_entree = true;
    }

    /// Place une erreur : le résultat et la démarche deviennent indisponibles.
    pub fn set_erreur(&mut self, msg: impl Into<String>) {
        self.erreur = msg.into();
        self.resultat.clear();
        self.resultat_dispo = false;
        self.demarche = Demarche::default();
        self.focus_entree = true;
    }

    pub fn set_resultat(&mut self, resultat: impl Into<String>, demarche: Demarche) {
        self.erreur.clear();
        self.resultat = resultat.into();
        self.resultat_dispo = true;
        self.demarche = demarche;
        self.focus_entree = true;
    }

    /// Garde-fou : l’échelle reste dans [1, 32].
    pub fn set_echelle(&mut self, echelle: u32) {
        self.echelle = echelle.clamp(ECHELLE_MIN, ECHELLE_MAX);
        self.focus_entree = true;
    }
}
