use std::fmt;

use serde::Serialize;

use crate::date::WorldDate;
use crate::season::Season;

/// A deity of the world's pantheon that a festival can honour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
#[allow(missing_docs)]
pub enum Deity {
    Luuren,
    Atronos,
    Dreyc,
    Ruuz,
    Vozc,
    Luna,
    Pulacc,
    Geraldo,
    Achos,
}

impl Deity {
    /// Lowercase identifier.
    pub fn as_str(self) -> &'static str {
        match self {
            Deity::Luuren => "luuren",
            Deity::Atronos => "atronos",
            Deity::Dreyc => "dreyc",
            Deity::Ruuz => "ruuz",
            Deity::Vozc => "vozc",
            Deity::Luna => "luna",
            Deity::Pulacc => "pulacc",
            Deity::Geraldo => "geraldo",
            Deity::Achos => "achos",
        }
    }
}

impl fmt::Display for Deity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recurring festival, pinned to a season and day and repeated every year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CalendarEvent {
    /// Stable identifier, e.g. `"spring-1-luuren"`.
    pub id: &'static str,
    /// Season the festival falls in.
    pub season: Season,
    /// Day of the season (1..=30).
    pub day: u32,
    /// Display title.
    pub title: &'static str,
    /// What happens on the day.
    pub description: &'static str,
    /// Free-form tags.
    pub tags: &'static [&'static str],
    /// The deity honoured, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deity: Option<Deity>,
}

impl CalendarEvent {
    /// True if the festival falls on the same season and day as `date`.
    pub fn falls_on(&self, date: &WorldDate) -> bool {
        self.season == date.season && self.day == date.day
    }
}

/// Events whose season and day match `date`. Year and time of day are ignored.
/// Table order is preserved.
pub fn events_for_date<'a>(date: &WorldDate, table: &'a [CalendarEvent]) -> Vec<&'a CalendarEvent> {
    table.iter().filter(|e| e.falls_on(date)).collect()
}

/// All events of one season, in table order.
pub fn events_in_season(season: Season, table: &[CalendarEvent]) -> Vec<&CalendarEvent> {
    table.iter().filter(|e| e.season == season).collect()
}

/// Look an event up by id.
pub fn find_event<'a>(id: &str, table: &'a [CalendarEvent]) -> Option<&'a CalendarEvent> {
    table.iter().find(|e| e.id == id)
}

/// The world's festival calendar.
pub const CALENDAR_EVENTS: &[CalendarEvent] = &[
    // Primavera
    CalendarEvent {
        id: "spring-1-luuren",
        season: Season::Spring,
        day: 1,
        deity: Some(Deity::Luuren),
        title: "Gratidão a Luuren",
        description: "Despedida do inverno e agradecimento a Luuren pelo novo ciclo; casas e ruas decoradas com flores invernais.",
        tags: &["festival"],
    },
    CalendarEvent {
        id: "spring-10-atronos",
        season: Season::Spring,
        day: 10,
        deity: Some(Deity::Atronos),
        title: "Dia da Criatividade",
        description: "Celebração de Atronos: histórias, invenções, novos pratos e tudo que envolve criatividade e conhecimento.",
        tags: &["festival"],
    },
    CalendarEvent {
        id: "spring-18-florescer-espiritual",
        season: Season::Spring,
        day: 18,
        deity: None,
        title: "Florescer Espiritual",
        description: "Véu entre mundo material e espiritual mais fino; músicas sobre os mortos, barracas de comida e lembranças dos entes queridos.",
        tags: &["espiritual", "grande-festival"],
    },
    CalendarEvent {
        id: "spring-22-bondade",
        season: Season::Spring,
        day: 22,
        deity: None,
        title: "Dia da Bondade",
        description: "Doações, grandes banquetes comunitários e ajuda aos necessitados.",
        tags: &["bondade", "comunidade"],
    },
    CalendarEvent {
        id: "spring-30-despedida-primavera",
        season: Season::Spring,
        day: 30,
        deity: None,
        title: "Despedida da Primavera",
        description: "Agradecimento pela primavera e chegada do verão; muitas flores e muita bebida.",
        tags: &["festival"],
    },
    // Verão
    CalendarEvent {
        id: "summer-1-pulacc",
        season: Season::Summer,
        day: 1,
        deity: Some(Deity::Pulacc),
        title: "Dia de Pulacc",
        description: "Banquetes e festas celebrando o sol, a alegria e as noites curtas do verão.",
        tags: &["festival"],
    },
    CalendarEvent {
        id: "summer-7-dreyc",
        season: Season::Summer,
        day: 7,
        deity: Some(Deity::Dreyc),
        title: "Dia de Dreyc",
        description: "Pessoas vestem branco, escrevem poesias e celebram relacionamentos.",
        tags: &["relacionamentos"],
    },
    CalendarEvent {
        id: "summer-18-geraldo",
        season: Season::Summer,
        day: 18,
        deity: Some(Deity::Geraldo),
        title: "Dia de Geraldo",
        description: "Data temida: pessoas evitam sair de casa e rezam para escapar da desgraça de Geraldo.",
        tags: &["perigoso"],
    },
    CalendarEvent {
        id: "summer-24-dia-da-alegria",
        season: Season::Summer,
        day: 24,
        deity: Some(Deity::Pulacc),
        title: "Dia da Alegria",
        description: "Festas, abraços e demonstrações de carinho, dia preferido de Pulacc.",
        tags: &["festival"],
    },
    CalendarEvent {
        id: "summer-30-despedida-verao",
        season: Season::Summer,
        day: 30,
        deity: None,
        title: "Reflexão de Fim de Verão",
        description: "Despedida do calor e reflexão em contato com a natureza.",
        tags: &["reflexao"],
    },
    // Outono
    CalendarEvent {
        id: "autumn-1-chegada-outono",
        season: Season::Autumn,
        day: 1,
        deity: None,
        title: "Chegada do Outono",
        description: "Despedida do verão e celebração da época das safras e frutas.",
        tags: &["colheita"],
    },
    CalendarEvent {
        id: "autumn-19-achos",
        season: Season::Autumn,
        day: 19,
        deity: Some(Deity::Achos),
        title: "Dia de Achos",
        description: "Brincadeiras, pequenas mentiras e sustos entre as pessoas.",
        tags: &["travessuras"],
    },
    CalendarEvent {
        id: "autumn-27-luuren",
        season: Season::Autumn,
        day: 27,
        deity: Some(Deity::Luuren),
        title: "Gratidão pelas Colheitas",
        description: "Festas em agradecimento a Luuren pelas colheitas e fertilidade.",
        tags: &["colheita", "festival"],
    },
    CalendarEvent {
        id: "autumn-30-despedida-outono",
        season: Season::Autumn,
        day: 30,
        deity: None,
        title: "Preparação para o Inverno",
        description: "Estoque de comida, lenha, preparação das estufas e correria geral.",
        tags: &["preparacao"],
    },
    // Inverno
    CalendarEvent {
        id: "winter-1-luna",
        season: Season::Winter,
        day: 1,
        deity: Some(Deity::Luna),
        title: "Dia de Luna",
        description: "Chegada do inverno; noites mais longas, casas enfeitadas com plantas brancas e símbolos de lua.",
        tags: &["inverno", "festival"],
    },
    CalendarEvent {
        id: "winter-6-vozc-ruuz",
        season: Season::Winter,
        day: 6,
        deity: Some(Deity::Ruuz),
        title: "Dia do Equilíbrio",
        description: "Celebração de Vozc e Ruuz em torno de fogueiras ou feiras nas cidades maiores.",
        tags: &["equilibrio"],
    },
    CalendarEvent {
        id: "winter-25-presentes",
        season: Season::Winter,
        day: 25,
        deity: None,
        title: "Dia dos Presentes",
        description: "Presentes para pessoas queridas e grandes refeições.",
        tags: &["presentes", "familia"],
    },
    CalendarEvent {
        id: "winter-30-fim-de-ano",
        season: Season::Winter,
        day: 30,
        deity: Some(Deity::Luna),
        title: "Grande Festança de Luna",
        description: "Fim do inverno e agradecimento por mais um ano; grandes festas e muita bebida.",
        tags: &["ano-novo", "festival"],
    },
];
