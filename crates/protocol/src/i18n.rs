//! Interface languages and translation tables.
//!
//! Texts are addressed by a `(section, key)` pair. A missing section or key
//! resolves to the key itself, so an untranslated label still shows something
//! recognisable instead of an empty cell.

use serde::{Deserialize, Serialize};

/// A supported interface language.
///
/// # Examples
///
/// ```
/// use beiramar_protocol::Language;
///
/// assert_eq!(Language::default(), Language::Pt);
/// assert_eq!(Language::En.t("datepicker", "today"), "Today");
/// assert_eq!(Language::Pt.t("datepicker", "today"), "Hoje");
/// assert_eq!(Language::En.t("datepicker", "nope"), "nope");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Portuguese.
    #[default]
    Pt,
    /// English.
    En,
}

type Section = (&'static str, &'static [(&'static str, &'static str)]);

impl Language {
    /// All languages, in cycle order.
    pub const ALL: [Self; 2] = [Self::Pt, Self::En];

    /// The two-letter code stored in preferences.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::Pt => "pt",
            Self::En => "en",
        }
    }

    /// Parses a two-letter code.
    #[must_use]
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.code() == code)
    }

    /// The next language, wrapping.
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            Self::Pt => Self::En,
            Self::En => Self::Pt,
        }
    }

    /// Looks up a text, falling back to `key`.
    #[must_use]
    pub fn t<'a>(self, section: &str, key: &'a str) -> &'a str {
        let table = match self {
            Self::Pt => PT,
            Self::En => EN,
        };
        table
            .iter()
            .find(|(name, _)| *name == section)
            .and_then(|(_, entries)| entries.iter().find(|(k, _)| *k == key))
            .map_or(key, |(_, text)| *text)
    }
}

const EN: &[Section] = &[
    ("nav", &[
        ("home", "Home"),
        ("hotels", "Hotels"),
        ("login", "Sign in"),
        ("register", "Register"),
        ("logout", "Sign out"),
        ("my_bookings", "My bookings"),
        ("admin", "Admin"),
        ("language", "Language"),
    ]),
    ("home", &[
        ("hero_title", "Stays worth remembering"),
        ("hero_sub", "Handpicked luxury hotels around the world"),
        ("destination", "Destination"),
        ("destination_placeholder", "Where to?"),
        ("checkin", "Check-in"),
        ("checkout", "Check-out"),
        ("guests", "Guests"),
        ("search", "Search"),
        ("featured_title", "Featured hotels"),
    ]),
    ("hotels", &[
        ("title", "Our hotels"),
        ("search_placeholder", "Search hotels or places"),
        ("location", "Location"),
        ("all", "All"),
        ("any", "Any"),
        ("max_price", "Max price"),
        ("min_rating", "Min rating"),
        ("sort", "Sort"),
        ("sort_rating", "Top rated"),
        ("sort_price_asc", "Price: low to high"),
        ("sort_price_desc", "Price: high to low"),
        ("sort_reviews", "Most reviewed"),
        ("properties_found", "properties found"),
        ("no_results", "No hotels match your filters"),
        ("reset", "Reset filters"),
        ("from", "from"),
        ("night", "night"),
        ("reviews", "reviews"),
    ]),
    ("detail", &[
        ("amenities", "Amenities"),
        ("available_rooms", "Available rooms"),
        ("book_title", "Book your stay"),
        ("checkin", "Check-in"),
        ("checkout", "Check-out"),
        ("guests_label", "Guests"),
        ("nights_label", "Nights"),
        ("total_label", "Total"),
        ("up_to", "up to"),
        ("select_first", "Select a room first"),
        ("continue", "Continue"),
        ("sign_in_hint", "Sign in to book this hotel"),
        ("error_dates", "Please select check-in and check-out dates."),
        ("error_order", "Check-out must be after check-in."),
        ("not_found", "Hotel not found"),
        ("night", "night"),
    ]),
    ("auth", &[
        ("login_title", "Welcome back"),
        ("register_title", "Create your account"),
        ("full_name", "Full name"),
        ("email", "Email"),
        ("password", "Password"),
        ("confirm_password", "Confirm password"),
        ("sign_in", "Sign in"),
        ("signing_in", "Signing in..."),
        ("create", "Create account"),
        ("creating", "Creating account..."),
        ("demo", "Admin demo: admin@beiramar.com / admin123"),
        ("error_match", "Passwords do not match."),
        ("error_length", "Password must be at least 6 characters."),
        ("error_taken", "Email already registered."),
        ("error_invalid", "Invalid email or password."),
        ("error_required", "Please fill in every field."),
        ("error_storage", "Could not reach account storage."),
    ]),
    ("booking", &[
        ("title", "Review your booking"),
        ("your_stay", "Your stay"),
        ("check_in", "Check-in"),
        ("check_out", "Check-out"),
        ("guests", "Guests"),
        ("nights", "nights"),
        ("price_summary", "Price summary"),
        ("taxes", "Taxes & fees (10%)"),
        ("service_fee", "Service fee"),
        ("total", "Total"),
        ("proceed", "Proceed to payment"),
        ("free", "Free"),
    ]),
    ("payment", &[
        ("title", "Payment"),
        ("card", "Card"),
        ("paypal", "PayPal"),
        ("bank", "Bank transfer"),
        ("card_name", "Name on card"),
        ("card_number", "Card number"),
        ("expiry", "Expiry"),
        ("cvv", "CVV"),
        ("alt_hint", "You will confirm the payment with your provider."),
        ("pay", "Pay"),
        ("processing", "Processing payment..."),
        ("success_title", "Booking confirmed"),
        ("success_ref", "Reference"),
        ("total_paid", "Total paid"),
        ("view_bookings", "View my bookings"),
        ("method", "Payment method"),
        ("order_summary", "Order summary"),
        ("hotel", "Hotel"),
        ("room", "Room"),
        ("error_required", "Please fill in the card details."),
    ]),
    ("dashboard", &[
        ("welcome", "Welcome"),
        ("my_reservations", "My reservations"),
        ("total_bookings", "Bookings"),
        ("confirmed", "Confirmed"),
        ("total_spent", "Total spent"),
        ("filter_all", "All"),
        ("filter_confirmed", "Confirmed"),
        ("filter_pending", "Pending"),
        ("filter_cancelled", "Cancelled"),
        ("empty_title", "No reservations yet"),
        ("cancel", "Cancel booking"),
        ("cancel_confirm", "Press again to cancel"),
        ("ref", "Ref"),
    ]),
    ("admin", &[
        ("title", "Admin overview"),
        ("total_bookings", "Total bookings"),
        ("confirmed", "Confirmed"),
        ("cancelled", "Cancelled"),
        ("revenue", "Revenue"),
        ("all_bookings", "All bookings"),
        ("registered_users", "Registered users"),
        ("hotels", "Hotels"),
        ("no_bookings", "No bookings yet"),
        ("no_users", "No registered users"),
        ("bookings", "bookings"),
        ("rooms", "rooms"),
        ("user", "User"),
    ]),
    ("datepicker", &[
        ("today", "Today"),
        ("clear", "Clear"),
    ]),
    ("help", &[
        ("title", "Help"),
        ("navigate", "Move between fields"),
        ("select", "Select / open"),
        ("back", "Back / close"),
        ("quit", "Quit"),
        ("language", "Switch language"),
        ("calendar", "Calendar: arrows move, PgUp/PgDn change month, t today, x clear"),
        ("pages", "Pages: 1 home, 2 hotels, 3 my bookings, 4 admin"),
        ("account", "Account: i sign in, n register, o sign out"),
        ("lists", "Lists: s sort, f status filter, r reset filters, c cancel booking"),
    ]),
];

const PT: &[Section] = &[
    ("nav", &[
        ("home", "Início"),
        ("hotels", "Hotéis"),
        ("login", "Entrar"),
        ("register", "Registar"),
        ("logout", "Sair"),
        ("my_bookings", "As minhas reservas"),
        ("admin", "Admin"),
        ("language", "Idioma"),
    ]),
    ("home", &[
        ("hero_title", "Estadias para recordar"),
        ("hero_sub", "Hotéis de luxo escolhidos a dedo em todo o mundo"),
        ("destination", "Destino"),
        ("destination_placeholder", "Para onde?"),
        ("checkin", "Entrada"),
        ("checkout", "Saída"),
        ("guests", "Hóspedes"),
        ("search", "Pesquisar"),
        ("featured_title", "Hotéis em destaque"),
    ]),
    ("hotels", &[
        ("title", "Os nossos hotéis"),
        ("search_placeholder", "Pesquisar hotéis ou locais"),
        ("location", "Localização"),
        ("all", "Todas"),
        ("any", "Qualquer"),
        ("max_price", "Preço máximo"),
        ("min_rating", "Avaliação mínima"),
        ("sort", "Ordenar"),
        ("sort_rating", "Melhor avaliados"),
        ("sort_price_asc", "Preço: crescente"),
        ("sort_price_desc", "Preço: decrescente"),
        ("sort_reviews", "Mais comentados"),
        ("properties_found", "propriedades encontradas"),
        ("no_results", "Nenhum hotel corresponde aos filtros"),
        ("reset", "Limpar filtros"),
        ("from", "desde"),
        ("night", "noite"),
        ("reviews", "avaliações"),
    ]),
    ("detail", &[
        ("amenities", "Comodidades"),
        ("available_rooms", "Quartos disponíveis"),
        ("book_title", "Reserve a sua estadia"),
        ("checkin", "Entrada"),
        ("checkout", "Saída"),
        ("guests_label", "Hóspedes"),
        ("nights_label", "Noites"),
        ("total_label", "Total"),
        ("up_to", "até"),
        ("select_first", "Selecione primeiro um quarto"),
        ("continue", "Continuar"),
        ("sign_in_hint", "Inicie sessão para reservar este hotel"),
        ("error_dates", "Selecione as datas de entrada e saída."),
        ("error_order", "A saída tem de ser depois da entrada."),
        ("not_found", "Hotel não encontrado"),
        ("night", "noite"),
    ]),
    ("auth", &[
        ("login_title", "Bem-vindo de volta"),
        ("register_title", "Crie a sua conta"),
        ("full_name", "Nome completo"),
        ("email", "Email"),
        ("password", "Palavra-passe"),
        ("confirm_password", "Confirmar palavra-passe"),
        ("sign_in", "Entrar"),
        ("signing_in", "A entrar..."),
        ("create", "Criar conta"),
        ("creating", "A criar conta..."),
        ("demo", "Demo admin: admin@beiramar.com / admin123"),
        ("error_match", "As palavras-passe não coincidem."),
        ("error_length", "A palavra-passe deve ter pelo menos 6 caracteres."),
        ("error_taken", "Email já registado."),
        ("error_invalid", "Email ou palavra-passe inválidos."),
        ("error_required", "Preencha todos os campos."),
        ("error_storage", "Não foi possível aceder às contas."),
    ]),
    ("booking", &[
        ("title", "Reveja a sua reserva"),
        ("your_stay", "A sua estadia"),
        ("check_in", "Entrada"),
        ("check_out", "Saída"),
        ("guests", "Hóspedes"),
        ("nights", "noites"),
        ("price_summary", "Resumo do preço"),
        ("taxes", "Taxas e impostos (10%)"),
        ("service_fee", "Taxa de serviço"),
        ("total", "Total"),
        ("proceed", "Avançar para pagamento"),
        ("free", "Grátis"),
    ]),
    ("payment", &[
        ("title", "Pagamento"),
        ("card", "Cartão"),
        ("paypal", "PayPal"),
        ("bank", "Transferência bancária"),
        ("card_name", "Nome no cartão"),
        ("card_number", "Número do cartão"),
        ("expiry", "Validade"),
        ("cvv", "CVV"),
        ("alt_hint", "Irá confirmar o pagamento junto do seu fornecedor."),
        ("pay", "Pagar"),
        ("processing", "A processar pagamento..."),
        ("success_title", "Reserva confirmada"),
        ("success_ref", "Referência"),
        ("total_paid", "Total pago"),
        ("view_bookings", "Ver as minhas reservas"),
        ("method", "Método de pagamento"),
        ("order_summary", "Resumo do pedido"),
        ("hotel", "Hotel"),
        ("room", "Quarto"),
        ("error_required", "Preencha os dados do cartão."),
    ]),
    ("dashboard", &[
        ("welcome", "Bem-vindo"),
        ("my_reservations", "As minhas reservas"),
        ("total_bookings", "Reservas"),
        ("confirmed", "Confirmadas"),
        ("total_spent", "Total gasto"),
        ("filter_all", "Todas"),
        ("filter_confirmed", "Confirmadas"),
        ("filter_pending", "Pendentes"),
        ("filter_cancelled", "Canceladas"),
        ("empty_title", "Ainda sem reservas"),
        ("cancel", "Cancelar reserva"),
        ("cancel_confirm", "Prima de novo para cancelar"),
        ("ref", "Ref"),
    ]),
    ("admin", &[
        ("title", "Painel de administração"),
        ("total_bookings", "Total de reservas"),
        ("confirmed", "Confirmadas"),
        ("cancelled", "Canceladas"),
        ("revenue", "Receita"),
        ("all_bookings", "Todas as reservas"),
        ("registered_users", "Utilizadores registados"),
        ("hotels", "Hotéis"),
        ("no_bookings", "Ainda sem reservas"),
        ("no_users", "Sem utilizadores registados"),
        ("bookings", "reservas"),
        ("rooms", "quartos"),
        ("user", "Utilizador"),
    ]),
    ("datepicker", &[
        ("today", "Hoje"),
        ("clear", "Limpar"),
    ]),
    ("help", &[
        ("title", "Ajuda"),
        ("navigate", "Mudar de campo"),
        ("select", "Selecionar / abrir"),
        ("back", "Voltar / fechar"),
        ("quit", "Sair"),
        ("language", "Mudar idioma"),
        ("calendar", "Calendário: setas movem, PgUp/PgDn mudam o mês, t hoje, x limpar"),
        ("pages", "Páginas: 1 início, 2 hotéis, 3 as minhas reservas, 4 admin"),
        ("account", "Conta: i entrar, n registar, o sair"),
        ("lists", "Listas: s ordenar, f filtrar estado, r limpar filtros, c cancelar reserva"),
    ]),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_section_falls_back_to_key() {
        assert_eq!(Language::Pt.t("missing", "title"), "title");
    }

    #[test]
    fn both_languages_share_keys() {
        for ((en_name, en), (pt_name, pt)) in EN.iter().zip(PT) {
            assert_eq!(en_name, pt_name);
            let en_keys: Vec<_> = en.iter().map(|(k, _)| *k).collect();
            let pt_keys: Vec<_> = pt.iter().map(|(k, _)| *k).collect();
            assert_eq!(en_keys, pt_keys, "section {en_name}");
        }
        assert_eq!(EN.len(), PT.len());
    }

    #[test]
    fn codes_roundtrip() {
        for lang in Language::ALL {
            assert_eq!(Language::from_code(lang.code()), Some(lang));
        }
        assert_eq!(Language::from_code("fr"), None);
    }

    #[test]
    fn serializes_as_code() {
        assert_eq!(serde_json::to_string(&Language::En).unwrap(), r#""en""#);
    }

    #[test]
    fn cycling_visits_both() {
        assert_eq!(Language::Pt.next(), Language::En);
        assert_eq!(Language::Pt.next().next(), Language::Pt);
    }
}
