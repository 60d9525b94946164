//! Built-in catalog and demo accounts the portal starts with.

use chrono::Utc;

use crate::models::{Course, Material, MaterialType, User, UserRole};
use crate::subscription::SubscriptionState;

pub const ADMIN_ID: &str = "admin_01";

fn material(
    id: &str,
    title: &str,
    kind: MaterialType,
    is_free: bool,
    duration: Option<&str>,
) -> Material {
    Material {
        id: id.to_string(),
        title: title.to_string(),
        kind,
        is_free,
        url: "#".to_string(),
        duration: duration.map(str::to_string),
    }
}

pub fn courses() -> Vec<Course> {
    use MaterialType::*;

    vec![
        Course {
            id: "db2".into(),
            title: "قواعد البيانات (Database)".into(),
            description: "شرح شامل لمنهج قواعد البيانات، SQL Server، تصميم الجداول، والـ Normalization.".into(),
            instructor: "د. محمد كمال".into(),
            thumbnail: "https://images.unsplash.com/photo-1544383225-681c8382cf56?q=80&w=1000&auto=format&fit=crop".into(),
            materials: vec![
                material("db_m1", "المحاضرة 1: مفاهيم Database Management", Video, true, Some("45:00")),
                material("db_m2", "المحاضرة 2: شرح ERD بالتفصيل", Video, false, Some("55:00")),
                material("db_m3", "Mapping ERD to Schema", Video, false, Some("60:00")),
                material("db_m4", "أوامر SQL: DDL & DML", Video, false, Some("50:00")),
                material("db_pdf1", "ملخص رسومات ERD", Pdf, false, None),
            ],
        },
        Course {
            id: "acc2".into(),
            title: "محاسبة شركات (Corporate Accounting)".into(),
            description: "كل ما يخص محاسبة الشركات: تكوين الشركات، الأسهم، السندات، وتصفية الشركات.".into(),
            instructor: "د. أحمد محمود".into(),
            thumbnail: "https://images.unsplash.com/photo-1554224155-98406858d0cb?q=80&w=1000&auto=format&fit=crop".into(),
            materials: vec![
                material("acc_m1", "تكوين شركات الأموال (الأسهم)", Video, true, Some("40:00")),
                material("acc_m2", "المعلاجة المحاسبية لإصدار السندات", Video, false, Some("50:00")),
                material("acc_m3", "مسائل تصفية الشركات", Video, false, Some("65:00")),
                material("acc_pdf1", "تمارين محلولة على الأسهم", Pdf, false, None),
                material("acc_quiz1", "امتحان على جزء الأسهم والسندات", Quiz, false, None),
            ],
        },
        Course {
            id: "prod2".into(),
            title: "مسائل إدارة الإنتاج (Production Mgt)".into(),
            description: "شرح العملي والمسائل: التنبؤ بالطلب، اختيار الموقع، ونظم الإنتاج.".into(),
            instructor: "م. سارة علي".into(),
            thumbnail: "https://images.unsplash.com/photo-1581091226825-a6a2a5aee158?q=80&w=1000&auto=format&fit=crop".into(),
            materials: vec![
                material("pm_m1", "مسائل التنبؤ بالطلب (Forecasting)", Video, true, Some("35:00")),
                material("pm_m2", "نقطة التعادل (Break-Even Analysis)", Video, false, Some("45:00")),
                material("pm_m3", "مسائل اختيار موقع المشروع", Video, false, Some("40:00")),
                material("pm_m4", "تخطيط الطاقة الإنتاجية", Video, false, Some("50:00")),
                material("pm_pdf1", "قوانين إدارة الإنتاج في ورقة واحدة", Pdf, true, None),
            ],
        },
    ]
}

/// The administrator account. Its role is fixed here, at creation time.
pub fn admin(email: &str, name: &str) -> User {
    User {
        id: ADMIN_ID.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        role: UserRole::Admin,
        subscription: SubscriptionState::Active,
        created_at: Utc::now(),
    }
}

/// Demo students shown on the admin dashboard, in registry order.
pub fn students() -> Vec<User> {
    let student = |id: &str, name: &str, email: &str, subscription| User {
        id: id.to_string(),
        name: name.to_string(),
        email: email.to_string(),
        role: UserRole::Student,
        subscription,
        created_at: Utc::now(),
    };

    vec![
        student("u1", "أحمد محمد", "ahmed@bis.com", SubscriptionState::Pending),
        student("u2", "سارة مصطفى", "sara@bis.com", SubscriptionState::Active),
        student("u3", "كريم عادل", "karim@bis.com", SubscriptionState::Pending),
    ]
}
